//! Geometry statements for the code backend.

use std::collections::HashMap;

use graft_core::{Document, HorizontalPin, NodeId, Rect, VerticalPin};
use graft_convert::{Anchor, AnchorRef, GeneratedCode, Statement};

use crate::{alignment_insets, frame_in_parent_space};

/// Append one geometry statement run per processed node, in traversal
/// order: absolute frame assignments, or constraint statements anchored
/// according to each node's pinning metadata.
pub fn emit_code_layout(
    doc: &Document,
    root: NodeId,
    generated: &mut GeneratedCode,
    use_constraints: bool,
) {
    let bindings: HashMap<NodeId, &str> = generated
        .processed
        .iter()
        .map(|p| (p.node, p.artifact.binding.as_str()))
        .collect();

    let mut statements = Vec::new();
    for processed in &generated.processed {
        let binding = processed.artifact.binding.as_str();
        // The main container's geometry is owned by the render service.
        if binding == generated.main_binding {
            continue;
        }

        let frame = frame_in_parent_space(doc, processed.node, processed.attached_to);
        if !use_constraints {
            statements.push(Statement::SetFrame {
                target: binding.to_string(),
                frame,
                alignment_rect: alignment_insets(&processed.artifact.class).is_some(),
            });
            continue;
        }

        let parent_binding = processed
            .attached_to
            .and_then(|parent| bindings.get(&parent).copied())
            .unwrap_or(generated.main_binding.as_str());
        let parent_size = match processed.attached_to {
            Some(parent) => doc.node(parent).frame.size(),
            None => doc.node(root).frame.size(),
        };

        emit_constraints(&mut statements, binding, parent_binding, frame, parent_size.width, parent_size.height, doc, processed.node);
    }
    generated.statements.extend(statements);
}

fn emit_constraints(
    statements: &mut Vec<Statement>,
    binding: &str,
    parent: &str,
    frame: Rect,
    parent_width: f64,
    parent_height: f64,
    doc: &Document,
    node: NodeId,
) {
    let pin = doc.node(node).pinning;

    let edge = |anchor: Anchor, reference: Anchor, constant: f64| Statement::Constraint {
        target: binding.to_string(),
        anchor,
        reference: Some(AnchorRef { target: parent.to_string(), anchor: reference }),
        constant,
    };
    let dimension = |anchor: Anchor, constant: f64| Statement::Constraint {
        target: binding.to_string(),
        anchor,
        reference: None,
        constant,
    };

    let mut fixed_width = true;
    match pin.horizontal {
        HorizontalPin::Left => statements.push(edge(Anchor::Leading, Anchor::Leading, frame.x)),
        HorizontalPin::Right => {
            statements.push(edge(Anchor::Trailing, Anchor::Trailing, frame.right() - parent_width));
        }
        HorizontalPin::Center => {
            let offset = frame.x + frame.width / 2.0 - parent_width / 2.0;
            statements.push(edge(Anchor::CenterX, Anchor::CenterX, offset));
        }
        HorizontalPin::LeftRight => {
            statements.push(edge(Anchor::Leading, Anchor::Leading, frame.x));
            statements.push(edge(Anchor::Trailing, Anchor::Trailing, frame.right() - parent_width));
            fixed_width = false;
        }
        HorizontalPin::Scale => {
            // Proportional scaling has no anchor-statement form; fall
            // back to the default pinning.
            log::debug!("node {node} pins horizontally by scale; emitting leading anchor");
            statements.push(edge(Anchor::Leading, Anchor::Leading, frame.x));
        }
    }

    let mut fixed_height = true;
    match pin.vertical {
        VerticalPin::Top => statements.push(edge(Anchor::Top, Anchor::Top, frame.y)),
        VerticalPin::Bottom => {
            statements.push(edge(Anchor::Bottom, Anchor::Bottom, frame.bottom() - parent_height));
        }
        VerticalPin::Center => {
            let offset = frame.y + frame.height / 2.0 - parent_height / 2.0;
            statements.push(edge(Anchor::CenterY, Anchor::CenterY, offset));
        }
        VerticalPin::TopBottom => {
            statements.push(edge(Anchor::Top, Anchor::Top, frame.y));
            statements.push(edge(Anchor::Bottom, Anchor::Bottom, frame.bottom() - parent_height));
            fixed_height = false;
        }
        VerticalPin::Scale => {
            log::debug!("node {node} pins vertically by scale; emitting top anchor");
            statements.push(edge(Anchor::Top, Anchor::Top, frame.y));
        }
    }

    if fixed_width {
        statements.push(dimension(Anchor::Width, frame.width));
    }
    if fixed_height {
        statements.push(dimension(Anchor::Height, frame.height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_convert::{CodeArtifact, ProcessedNode};
    use graft_core::{ComponentLibrary, DesignNode, NodeArena, NodeKind, Pinning};

    fn doc_with_button(pinning: Pinning) -> (Document, NodeId) {
        let mut arena = NodeArena::new();
        let root = arena.insert(
            DesignNode::new(NodeKind::Frame, "main").with_frame(Rect::new(0.0, 0.0, 480.0, 360.0)),
            None,
        );
        let button = arena.insert(
            DesignNode::new(NodeKind::Frame, "ok")
                .with_frame(Rect::new(19.0, 20.0, 84.0, 21.0))
                .with_pinning(pinning),
            Some(root),
        );
        (Document::new(arena, ComponentLibrary::new(), root), button)
    }

    fn generated_for(node: NodeId) -> GeneratedCode {
        GeneratedCode {
            statements: Vec::new(),
            private_members: Vec::new(),
            processed: vec![ProcessedNode {
                node,
                attached_to: None,
                artifact: CodeArtifact {
                    node,
                    binding: "okButton".into(),
                    class: "Button".into(),
                    is_member: false,
                },
            }],
            main_binding: "view".into(),
        }
    }

    fn lines(generated: &GeneratedCode) -> Vec<String> {
        generated.statements.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn frame_mode_emits_alignment_adjusted_frames_for_controls() {
        let (doc, button) = doc_with_button(Pinning::default());
        let mut generated = generated_for(button);
        emit_code_layout(&doc, doc.root, &mut generated, false);

        assert_eq!(
            lines(&generated),
            vec!["okButton.frame = okButton.alignmentRect(for: Rect(x: 19, y: 20, width: 84, height: 21))"]
        );
    }

    #[test]
    fn default_pinning_anchors_top_left_with_fixed_size() {
        let (doc, button) = doc_with_button(Pinning::default());
        let mut generated = generated_for(button);
        emit_code_layout(&doc, doc.root, &mut generated, true);

        assert_eq!(
            lines(&generated),
            vec![
                "okButton.leadingAnchor.constraint(equalTo: view.leadingAnchor, constant: 19).isActive = true",
                "okButton.topAnchor.constraint(equalTo: view.topAnchor, constant: 20).isActive = true",
                "okButton.widthAnchor.constraint(equalToConstant: 84).isActive = true",
                "okButton.heightAnchor.constraint(equalToConstant: 21).isActive = true",
            ]
        );
    }

    #[test]
    fn bottom_right_pinning_anchors_trailing_edges() {
        use graft_core::{HorizontalPin, VerticalPin};
        let (doc, button) =
            doc_with_button(Pinning::new(HorizontalPin::Right, VerticalPin::Bottom));
        let mut generated = generated_for(button);
        emit_code_layout(&doc, doc.root, &mut generated, true);

        assert_eq!(
            lines(&generated),
            vec![
                "okButton.trailingAnchor.constraint(equalTo: view.trailingAnchor, constant: -377).isActive = true",
                "okButton.bottomAnchor.constraint(equalTo: view.bottomAnchor, constant: -319).isActive = true",
                "okButton.widthAnchor.constraint(equalToConstant: 84).isActive = true",
                "okButton.heightAnchor.constraint(equalToConstant: 21).isActive = true",
            ]
        );
    }

    #[test]
    fn stretch_pinning_drops_the_fixed_dimension() {
        use graft_core::{HorizontalPin, VerticalPin};
        let (doc, button) =
            doc_with_button(Pinning::new(HorizontalPin::LeftRight, VerticalPin::Top));
        let mut generated = generated_for(button);
        emit_code_layout(&doc, doc.root, &mut generated, true);

        let rendered = lines(&generated);
        assert!(rendered.iter().any(|l| l.contains("leadingAnchor")));
        assert!(rendered.iter().any(|l| l.contains("trailingAnchor")));
        assert!(!rendered.iter().any(|l| l.contains("widthAnchor")));
        assert!(rendered.iter().any(|l| l.contains("heightAnchor")));
    }

    #[test]
    fn main_binding_gets_no_geometry() {
        let (doc, button) = doc_with_button(Pinning::default());
        let mut generated = generated_for(button);
        generated.processed[0].artifact.binding = "view".into();
        emit_code_layout(&doc, doc.root, &mut generated, true);
        assert!(generated.statements.is_empty());
    }
}
