//! Shared helpers for control strategies.

use graft_convert::Value;
use graft_core::ControlVariant;

/// Name of the text run carrying a control's label.
pub const TITLE: &str = "TITLE";
/// Group name marking the default (key-equivalent) state.
pub const STATE_DEFAULT: &str = "STATE_DEFAULT";
/// Group name marking the disabled state.
pub const STATE_DISABLED: &str = "STATE_DISABLED";

/// Control size keyword for a variant.
pub fn control_size(variant: ControlVariant) -> &'static str {
    match variant {
        ControlVariant::Regular => "regular",
        ControlVariant::Small => "small",
        ControlVariant::Mini => "mini",
    }
}

/// System font keyword for a variant.
pub fn font(variant: ControlVariant) -> &'static str {
    match variant {
        ControlVariant::Regular => "systemRegular",
        ControlVariant::Small => "systemSmall",
        ControlVariant::Mini => "systemMini",
    }
}

/// A label value for the code backend: quoted literal, or a localization
/// call when label translation is on.
pub fn translatable(text: &str, translate: bool) -> Value {
    if translate {
        Value::Raw(format!("localized({})", Value::str(text)))
    } else {
        Value::str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translatable_quotes_only_untranslated_labels() {
        assert_eq!(translatable("OK", false).to_string(), "\"OK\"");
        assert_eq!(translatable("OK", true).to_string(), "localized(\"OK\")");
    }
}
