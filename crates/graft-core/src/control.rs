//! Control classification annotations.
//!
//! Author-side documents tag frames and component instances with a coarse
//! control type plus an optional size/state variant (`"button/small"`,
//! `"combo box"`, `"window/sheet"`). Strategies consult both parts;
//! unrecognized variant tokens fall back to the type's default rather
//! than failing.

use serde::{Deserialize, Serialize};

/// Coarse native control type a node maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlType {
    Button,
    ButtonHelp,
    Checkbox,
    Radio,
    PopUpButton,
    ComboBox,
    TextField,
    Label,
    ProgressSpinner,
    Separator,
    Window,
    WindowSheet,
    WindowPanel,
}

impl ControlType {
    fn from_token(token: &str) -> Option<Self> {
        let control = match token {
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "popup" | "popupbutton" => Self::PopUpButton,
            "combobox" | "combo" => Self::ComboBox,
            "textfield" => Self::TextField,
            "label" => Self::Label,
            "spinner" | "progressspinner" => Self::ProgressSpinner,
            "separator" | "sep" => Self::Separator,
            "window" => Self::Window,
            "sheet" => Self::WindowSheet,
            "panel" => Self::WindowPanel,
            _ => return None,
        };
        Some(control)
    }

    /// Whether this type is one of the window-like containers that act as
    /// dialog parent chrome rather than an embedded control.
    pub fn is_window(&self) -> bool {
        matches!(self, Self::Window | Self::WindowSheet | Self::WindowPanel)
    }
}

/// Size variant of a control. Drawn from a fixed set; anything else in the
/// annotation is ignored and the default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlVariant {
    #[default]
    Regular,
    Small,
    Mini,
}

impl ControlVariant {
    fn from_token(token: &str) -> Option<Self> {
        let variant = match token {
            "regular" => Self::Regular,
            "small" => Self::Small,
            "mini" => Self::Mini,
            _ => return None,
        };
        Some(variant)
    }
}

/// A resolved `(type, variant)` control annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlClass {
    pub control: ControlType,
    #[serde(default)]
    pub variant: ControlVariant,
}

impl ControlClass {
    pub const fn new(control: ControlType) -> Self {
        Self { control, variant: ControlVariant::Regular }
    }

    pub const fn with_variant(control: ControlType, variant: ControlVariant) -> Self {
        Self { control, variant }
    }

    /// Parse an annotation string like `"button/small"`, `"window/sheet"`
    /// or `"combo box"`. The first recognized token selects the type;
    /// `button` followed by a `help` token selects the help-button type;
    /// later tokens may select a variant. Returns `None` only when no
    /// token names a control type at all.
    pub fn parse(annotation: &str) -> Option<Self> {
        let normalized = annotation.to_lowercase();
        let tokens: Vec<&str> = normalized
            .split(|c: char| c == '/' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        let mut control = None;
        let mut variant = ControlVariant::default();
        for token in &tokens {
            match control {
                None => {
                    control = ControlType::from_token(token);
                }
                // "window/sheet" refines window into the sheet type.
                Some(ControlType::Window) => {
                    if let Some(refined) = ControlType::from_token(token) {
                        if refined.is_window() {
                            control = Some(refined);
                            continue;
                        }
                    }
                    if let Some(v) = ControlVariant::from_token(token) {
                        variant = v;
                    }
                }
                Some(ControlType::Button) if *token == "help" => {
                    control = Some(ControlType::ButtonHelp);
                }
                Some(_) => {
                    if let Some(v) = ControlVariant::from_token(token) {
                        variant = v;
                    }
                }
            }
        }

        control.map(|control| Self { control, variant })
    }
}
