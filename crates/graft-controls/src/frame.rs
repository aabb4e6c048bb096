//! Generic frame container fallback.

use graft_convert::{
    CodeProduction, NodeConverter, Value, ViewClass, ViewId, ViewProduction, ViewValue,
};
use graft_core::{ConvertError, Document, NodeId, NodeKind};

/// Converts unclassified frames into plain container views. Registered
/// last: anything a more specific strategy claims never reaches it, and
/// groups stay unconverted so they flatten away.
pub struct FrameConverter;

impl NodeConverter for FrameConverter {
    fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
        doc.node(node).kind == NodeKind::Frame && doc.control_class(node).is_none()
    }

    fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
        ViewClass::VIEW
    }

    fn convert_to_view(
        &self,
        _doc: &Document,
        _node: NodeId,
        production: &mut ViewProduction<'_>,
    ) -> Result<ViewId, ConvertError> {
        let view = production.tree.create(ViewClass::VIEW);
        production.tree.set_property(view, "wantsLayer", ViewValue::Bool(true));
        Ok(view)
    }

    fn convert_to_code(
        &self,
        _doc: &Document,
        _node: NodeId,
        production: &mut CodeProduction<'_>,
    ) -> Result<(), ConvertError> {
        production.assign("wantsLayer", Value::Bool(true));
        Ok(())
    }
}
