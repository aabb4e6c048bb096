//! Push-button and help-button strategy.

use graft_convert::{
    CodeProduction, NodeConverter, Value, ViewClass, ViewId, ViewProduction, ViewValue,
};
use graft_core::{ControlClass, ControlType, ConvertError, Document, NodeId, NodeKind};

use crate::helpers;

/// Converts frames and instances classified as buttons. Help buttons keep
/// an empty title; regular buttons read their title from the first
/// visible state group's TITLE text run.
pub struct ButtonConverter;

impl ButtonConverter {
    fn class_of(doc: &Document, node: NodeId) -> ControlClass {
        doc.control_class(node)
            .unwrap_or(ControlClass::new(ControlType::Button))
    }

    /// First visible state group of the button's subtree.
    fn state_group(doc: &Document, node: NodeId) -> Option<NodeId> {
        doc.first_visible_content_child(node, |n| n.kind == NodeKind::Group)
    }

    fn title_text(doc: &Document, group: NodeId) -> Option<String> {
        let text = doc.first_visible_content_child(group, |n| n.is_text() && n.name == helpers::TITLE)?;
        doc.node(text).characters.clone()
    }
}

impl NodeConverter for ButtonConverter {
    fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
        matches!(
            doc.control_class(node).map(|class| class.control),
            Some(ControlType::Button | ControlType::ButtonHelp)
        )
    }

    fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
        ViewClass::BUTTON
    }

    fn scan_children(&self, _doc: &Document, _node: NodeId) -> bool {
        false
    }

    fn convert_to_view(
        &self,
        doc: &Document,
        node: NodeId,
        production: &mut ViewProduction<'_>,
    ) -> Result<ViewId, ConvertError> {
        let class = Self::class_of(doc, node);
        let button = production.tree.create(ViewClass::BUTTON);

        match class.control {
            ControlType::ButtonHelp => {
                production.tree.set_property(button, "bezelStyle", ViewValue::Keyword("help"));
                production.tree.set_property(button, "title", ViewValue::Str(String::new()));
            }
            _ => {
                production.tree.set_property(button, "bezelStyle", ViewValue::Keyword("rounded"));
            }
        }
        production.tree.set_property(
            button,
            "controlSize",
            ViewValue::Keyword(helpers::control_size(class.variant)),
        );
        production
            .tree
            .set_property(button, "font", ViewValue::Keyword(helpers::font(class.variant)));

        if let Some(group) = Self::state_group(doc, node) {
            if class.control != ControlType::ButtonHelp {
                if let Some(title) = Self::title_text(doc, group) {
                    production.tree.set_property(button, "title", ViewValue::Str(title));
                }
            }
            match doc.node(group).name.as_str() {
                helpers::STATE_DISABLED => {
                    production.tree.set_property(button, "enabled", ViewValue::Bool(false));
                }
                helpers::STATE_DEFAULT => {
                    production
                        .tree
                        .set_property(button, "keyEquivalent", ViewValue::Str("\r".into()));
                }
                _ => {}
            }
        }

        Ok(button)
    }

    fn convert_to_code(
        &self,
        doc: &Document,
        node: NodeId,
        production: &mut CodeProduction<'_>,
    ) -> Result<(), ConvertError> {
        let class = Self::class_of(doc, node);

        match class.control {
            ControlType::ButtonHelp => {
                production.assign("bezelStyle", Value::keyword("help"));
                production.assign("title", Value::str(""));
            }
            _ => {
                production.assign("bezelStyle", Value::keyword("rounded"));
            }
        }
        production.assign("controlSize", Value::keyword(helpers::control_size(class.variant)));
        production.assign("font", Value::keyword(helpers::font(class.variant)));

        if let Some(group) = Self::state_group(doc, node) {
            if class.control != ControlType::ButtonHelp {
                if let Some(title) = Self::title_text(doc, group) {
                    let translate = production.options.translate_labels;
                    production.assign("title", helpers::translatable(&title, translate));
                }
            }
            match doc.node(group).name.as_str() {
                helpers::STATE_DISABLED => production.assign("enabled", Value::Bool(false)),
                helpers::STATE_DEFAULT => production.assign("keyEquivalent", Value::str("\r")),
                _ => {}
            }
        }

        Ok(())
    }
}
