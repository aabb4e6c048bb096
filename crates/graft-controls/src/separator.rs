//! Separator strategy for `sep`-named vector shapes.

use graft_convert::{
    CodeProduction, NodeConverter, Value, ViewClass, ViewId, ViewProduction, ViewValue,
};
use graft_core::{ControlType, ConvertError, Document, NodeId};

/// Converts separator vectors into separator boxes. Other vector and
/// boolean shapes stay unconverted (opaque leaves).
pub struct SeparatorConverter;

impl NodeConverter for SeparatorConverter {
    fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
        let design = doc.node(node);
        if !design.is_compound_vector() {
            return false;
        }
        design.name == "sep"
            || doc
                .control_class(node)
                .is_some_and(|class| class.control == ControlType::Separator)
    }

    fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
        ViewClass::BOX
    }

    fn convert_to_view(
        &self,
        _doc: &Document,
        _node: NodeId,
        production: &mut ViewProduction<'_>,
    ) -> Result<ViewId, ConvertError> {
        let view = production.tree.create(ViewClass::BOX);
        production.tree.set_property(view, "boxType", ViewValue::Keyword("separator"));
        Ok(view)
    }

    fn convert_to_code(
        &self,
        _doc: &Document,
        _node: NodeId,
        production: &mut CodeProduction<'_>,
    ) -> Result<(), ConvertError> {
        production.assign("boxType", Value::keyword("separator"));
        Ok(())
    }
}
