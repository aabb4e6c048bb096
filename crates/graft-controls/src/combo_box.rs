//! Combo-box strategy.

use graft_convert::{
    CodeProduction, NodeConverter, Value, ViewClass, ViewId, ViewProduction, ViewValue,
};
use graft_core::{ControlType, ConvertError, Document, NodeId};

use crate::helpers;

/// Converts frames and instances classified as combo boxes. The string
/// value comes from a TITLE text child; a missing or empty title emits
/// nothing at all, not an empty string.
pub struct ComboBoxConverter;

impl ComboBoxConverter {
    fn title_text(doc: &Document, node: NodeId) -> Option<String> {
        let text = doc.first_visible_content_child(node, |n| n.is_text() && n.name == helpers::TITLE)?;
        doc.node(text)
            .characters
            .clone()
            .filter(|characters| !characters.is_empty())
    }
}

impl NodeConverter for ComboBoxConverter {
    fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
        doc.control_class(node)
            .is_some_and(|class| class.control == ControlType::ComboBox)
    }

    fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
        ViewClass::COMBO_BOX
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
        let variant = doc.control_class(node).map(|class| class.variant).unwrap_or_default();
        let combo = production.tree.create(ViewClass::COMBO_BOX);
        production
            .tree
            .set_property(combo, "controlSize", ViewValue::Keyword(helpers::control_size(variant)));
        production.tree.set_property(combo, "font", ViewValue::Keyword(helpers::font(variant)));

        if let Some(title) = Self::title_text(doc, node) {
            production.tree.set_property(combo, "stringValue", ViewValue::Str(title));
        }

        Ok(combo)
    }

    fn convert_to_code(
        &self,
        doc: &Document,
        node: NodeId,
        production: &mut CodeProduction<'_>,
    ) -> Result<(), ConvertError> {
        let variant = doc.control_class(node).map(|class| class.variant).unwrap_or_default();
        production.assign("controlSize", Value::keyword(helpers::control_size(variant)));
        production.assign("font", Value::keyword(helpers::font(variant)));

        if let Some(title) = Self::title_text(doc, node) {
            production.assign("stringValue", Value::Str(title));
        }

        Ok(())
    }
}
