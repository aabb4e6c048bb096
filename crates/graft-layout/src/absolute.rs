//! Immediate frame placement for the view backend.

use graft_core::Document;
use graft_convert::RenderedViews;

use crate::{alignment_insets, frame_in_parent_space};

/// Assign every produced view its final frame. Controls with alignment
/// insets get their layout frame expanded around the design (visual)
/// rect, the way the host toolkit's alignment-rect conversion would.
pub fn apply_view_layout(doc: &Document, rendered: &mut RenderedViews) {
    for processed in &rendered.processed {
        let mut frame = frame_in_parent_space(doc, processed.node, processed.attached_to);
        let class = rendered.tree.view(processed.artifact.view).class;
        if let Some((left, top, right, bottom)) = alignment_insets(class.name()) {
            frame = frame.expanded(left, top, right, bottom);
        }
        rendered.tree.set_frame(processed.artifact.view, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_convert::{ProcessedNode, ViewArtifact, ViewClass, ViewTree};
    use graft_core::{ComponentLibrary, DesignNode, NodeArena, NodeKind, Rect};

    #[test]
    fn frames_are_assigned_with_control_insets() {
        let mut arena = NodeArena::new();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let button = arena.insert(
            DesignNode::new(NodeKind::Frame, "ok").with_frame(Rect::new(378.0, 20.0, 84.0, 21.0)),
            Some(root),
        );
        let label = arena.insert(
            DesignNode::new(NodeKind::Text, "hint").with_frame(Rect::new(10.0, 50.0, 120.0, 16.0)),
            Some(root),
        );
        let doc = Document::new(arena, ComponentLibrary::new(), root);

        let mut tree = ViewTree::new();
        let main = tree.create(ViewClass::VIEW);
        let button_view = tree.create(ViewClass::BUTTON);
        let label_view = tree.create(ViewClass::LABEL);
        tree.add_subview(main, button_view);
        tree.add_subview(main, label_view);

        let mut rendered = RenderedViews {
            tree,
            main: Some(main),
            processed: vec![
                ProcessedNode {
                    node: button,
                    attached_to: None,
                    artifact: ViewArtifact { view: button_view },
                },
                ProcessedNode {
                    node: label,
                    attached_to: None,
                    artifact: ViewArtifact { view: label_view },
                },
            ],
        };

        apply_view_layout(&doc, &mut rendered);

        // Button frame expands by its bezel insets.
        assert_eq!(
            rendered.tree.view(button_view).frame,
            Some(Rect::new(376.0, 18.0, 88.0, 26.0))
        );
        // Plain labels place as-is.
        assert_eq!(
            rendered.tree.view(label_view).frame,
            Some(Rect::new(10.0, 50.0, 120.0, 16.0))
        );
    }

    #[test]
    fn degenerate_geometry_is_still_applied() {
        let mut arena = NodeArena::new();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let sep = arena.insert(
            DesignNode::new(NodeKind::Vector, "sep").with_frame(Rect::new(0.0, 59.5, 481.0, 0.0)),
            Some(root),
        );
        let doc = Document::new(arena, ComponentLibrary::new(), root);

        let mut tree = ViewTree::new();
        let sep_view = tree.create(ViewClass::BOX);
        let mut rendered = RenderedViews {
            tree,
            main: None,
            processed: vec![ProcessedNode {
                node: sep,
                attached_to: None,
                artifact: ViewArtifact { view: sep_view },
            }],
        };

        apply_view_layout(&doc, &mut rendered);
        assert_eq!(rendered.tree.view(sep_view).frame, Some(Rect::new(0.0, 59.5, 481.0, 0.0)));
    }
}
