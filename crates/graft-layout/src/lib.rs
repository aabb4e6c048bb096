//! Layout pass over a finished conversion run.
//!
//! Runs after the traversal, over the flat list of (node, artifact)
//! pairs: the view backend gets immediate frame assignment (adjusted for
//! controls whose visual bounds differ from their layout bounds), the
//! code backend gets frame-assignment statements or, in constraint mode,
//! anchor statements chosen from each node's pinning metadata.
//!
//! Geometry is never validated here: a degenerate (zero or negative size)
//! frame is applied as-is and only logged.

mod absolute;
mod constraints;

pub use absolute::apply_view_layout;
pub use constraints::emit_code_layout;

use graft_core::{Document, NodeId, NodeKind, Rect};
use graft_convert::{GeneratedCode, RenderedViews};

/// Drives the layout pass for either backend's output. `uses_constraints`
/// only affects the code backend; the view backend always places frames
/// immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutManager {
    pub uses_constraints: bool,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraints() -> Self {
        Self { uses_constraints: true }
    }

    /// Assign final frames in a rendered view tree.
    pub fn run_views(&self, doc: &Document, rendered: &mut RenderedViews) {
        absolute::apply_view_layout(doc, rendered);
    }

    /// Append geometry statements for generated code. `root` is the node
    /// the run was rendered from; its size is the main container's size.
    pub fn run_code(&self, doc: &Document, root: NodeId, generated: &mut GeneratedCode) {
        constraints::emit_code_layout(doc, root, generated, self.uses_constraints);
    }
}

/// Per-edge alignment insets for control classes whose visual bounds are
/// smaller than their layout bounds (bezel padding). `None` for plain
/// views.
pub(crate) fn alignment_insets(class: &str) -> Option<(f64, f64, f64, f64)> {
    match class {
        "Button" => Some((2.0, 2.0, 2.0, 3.0)),
        "ComboBox" | "PopUpButton" => Some((1.0, 2.0, 1.0, 2.0)),
        "TextField" => Some((1.0, 1.0, 1.0, 1.0)),
        _ => None,
    }
}

/// Translate a node's design-relative frame into the coordinate space of
/// the artifact it was attached to, accumulating the offsets of flattened
/// ancestors in between.
pub(crate) fn frame_in_parent_space(
    doc: &Document,
    node: NodeId,
    attached_to: Option<NodeId>,
) -> Rect {
    let mut frame = doc.node(node).frame;
    for ancestor in doc.arena.ancestors(node) {
        if Some(ancestor) == attached_to {
            break;
        }
        let design = doc.node(ancestor);
        // A definition root's space is the referencing instance's space.
        if design.kind == NodeKind::Component {
            break;
        }
        if attached_to.is_none()
            && (design.kind == NodeKind::Canvas
                || doc.is_root_content(ancestor)
                || doc.is_dialog_container(ancestor, None)
                || doc.is_window_content(ancestor))
        {
            // The main container's own coordinate space starts here.
            break;
        }
        frame.x += design.frame.x;
        frame.y += design.frame.y;
    }
    if frame.is_degenerate() {
        log::debug!("node {node} has degenerate geometry {frame:?}");
    }
    frame
}
