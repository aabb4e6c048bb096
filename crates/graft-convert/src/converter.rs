//! The conversion strategy contract.

use graft_core::{ConvertError, Document, NodeId};

use crate::code::Statement;
use crate::context::RenderOptions;
use crate::view::{ViewClass, ViewId, ViewTree};

/// Mutable state a strategy produces views into.
pub struct ViewProduction<'a> {
    pub tree: &'a mut ViewTree,
    pub options: &'a RenderOptions,
}

/// Mutable state a strategy emits statements into. The construction
/// statement for `binding` (when one is needed) has already been emitted
/// by the backend; strategies only append configuration.
pub struct CodeProduction<'a> {
    /// Symbolic name the current node is bound to.
    pub binding: &'a str,
    pub statements: &'a mut Vec<Statement>,
    pub options: &'a RenderOptions,
}

impl CodeProduction<'_> {
    pub fn assign(&mut self, property: impl Into<String>, value: crate::code::Value) {
        self.statements.push(Statement::Assign {
            target: self.binding.to_string(),
            property: property.into(),
            value,
        });
    }
}

/// A pluggable transformation strategy.
///
/// Strategies are registered in a fixed, meaningful order; the first one
/// whose [`Self::can_convert`] accepts a node wins. Predicates must be
/// pure functions of the node and document; production runs exactly once
/// per node per run (enforced by the processed-node cache).
pub trait NodeConverter: Send + Sync {
    /// Whether this strategy applies to `node`.
    fn can_convert(&self, doc: &Document, node: NodeId) -> bool;

    /// Target class of the produced view (also the declared type of
    /// private members in the code backend).
    fn view_class(&self, doc: &Document, node: NodeId) -> ViewClass;

    /// Whether the pipeline descends into this node's children. Controls
    /// that consume their subtree internally return `false`.
    fn scan_children(&self, _doc: &Document, _node: NodeId) -> bool {
        true
    }

    /// Produce the live view for `node`. Attachment to the parent is the
    /// pipeline's job.
    fn convert_to_view(
        &self,
        doc: &Document,
        node: NodeId,
        production: &mut ViewProduction<'_>,
    ) -> Result<ViewId, ConvertError>;

    /// Emit configuration statements for `node` under the binding in
    /// `production`.
    fn convert_to_code(
        &self,
        doc: &Document,
        node: NodeId,
        production: &mut CodeProduction<'_>,
    ) -> Result<(), ConvertError>;
}
