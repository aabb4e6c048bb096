//! Text-run strategy.

use graft_convert::{
    CodeProduction, NodeConverter, Value, ViewClass, ViewId, ViewProduction, ViewValue,
};
use graft_core::{ConvertError, Document, NodeId, TextAlign};

use crate::helpers;

/// Converts text runs into non-editable labels.
pub struct LabelConverter;

impl NodeConverter for LabelConverter {
    fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
        doc.node(node).is_text()
    }

    fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
        ViewClass::LABEL
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
        let design = doc.node(node);
        let label = production.tree.create(ViewClass::LABEL);
        if let Some(characters) = design.characters.clone() {
            production.tree.set_property(label, "text", ViewValue::Str(characters));
        }
        if let Some(alignment) = alignment_keyword(design.text_align) {
            production.tree.set_property(label, "alignment", ViewValue::Keyword(alignment));
        }
        Ok(label)
    }

    fn convert_to_code(
        &self,
        doc: &Document,
        node: NodeId,
        production: &mut CodeProduction<'_>,
    ) -> Result<(), ConvertError> {
        let design = doc.node(node);
        if let Some(characters) = design.characters.as_deref() {
            let translate = production.options.translate_labels;
            production.assign("text", helpers::translatable(characters, translate));
        }
        if let Some(alignment) = alignment_keyword(design.text_align) {
            production.assign("alignment", Value::keyword(alignment));
        }
        Ok(())
    }
}

/// Alignment keyword, `None` for the default leading alignment.
fn alignment_keyword(align: TextAlign) -> Option<&'static str> {
    match align {
        TextAlign::Leading => None,
        TextAlign::Center => Some("center"),
        TextAlign::Trailing => Some("trailing"),
    }
}
