//! Raw document shape handed over by an external loader.
//!
//! The engine does not own a wire format; it accepts an already parsed
//! nested tree and flattens it into the arena, wiring parent links and
//! registering component definitions along the way.

use serde::{Deserialize, Serialize};

use crate::component::{ComponentDefinition, ComponentLibrary};
use crate::control::ControlClass;
use crate::document::Document;
use crate::error::DocumentError;
use crate::geometry::{Pinning, Rect};
use crate::node::{DesignNode, NodeArena, NodeId, NodeKind, TextAlign};

/// A design document as delivered by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub name: String,
    /// Component definition subtrees, owned by the document but detached
    /// from the page tree.
    #[serde(default)]
    pub components: Vec<RawNode>,
    /// Page content.
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// One nested node of the raw tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub frame: Rect,
    #[serde(default)]
    pub pinning: Option<Pinning>,
    /// Control annotation string, e.g. `"button/small"`.
    #[serde(default)]
    pub control: Option<String>,
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub component_key: Option<String>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

fn default_visible() -> bool {
    true
}

impl RawNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            frame: Rect::default(),
            pinning: None,
            control: None,
            characters: None,
            text_align: TextAlign::default(),
            component_key: None,
            children: Vec::new(),
        }
    }

    fn to_node(&self) -> DesignNode {
        DesignNode {
            name: self.name.clone(),
            kind: self.kind,
            visible: self.visible,
            frame: self.frame,
            pinning: self.pinning.unwrap_or_default(),
            control: self.control.as_deref().and_then(ControlClass::parse),
            characters: self.characters.clone(),
            text_align: self.text_align,
            component_key: self.component_key.clone(),
        }
    }
}

impl RawDocument {
    /// Flatten the raw tree into an arena-backed [`Document`].
    pub fn load(&self) -> Result<Document, DocumentError> {
        let mut arena = NodeArena::new();
        let mut components = ComponentLibrary::new();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, self.name.clone()), None);

        for raw in &self.components {
            let id = insert_subtree(&mut arena, raw, None, &mut components)?;
            register_definition(raw, id, &mut components)?;
        }
        for raw in &self.children {
            insert_subtree(&mut arena, raw, Some(root), &mut components)?;
        }

        log::debug!(
            "loaded document '{}': {} nodes, {} components",
            self.name,
            arena.len(),
            components.len()
        );
        Ok(Document::new(arena, components, root))
    }
}

fn insert_subtree(
    arena: &mut NodeArena,
    raw: &RawNode,
    parent: Option<NodeId>,
    components: &mut ComponentLibrary,
) -> Result<NodeId, DocumentError> {
    let id = arena.insert(raw.to_node(), parent);
    // Definitions placed inside the page tree register too.
    if parent.is_some() && raw.kind == NodeKind::Component {
        register_definition(raw, id, components)?;
    }
    for child in &raw.children {
        insert_subtree(arena, child, Some(id), components)?;
    }
    Ok(id)
}

fn register_definition(
    raw: &RawNode,
    root: NodeId,
    components: &mut ComponentLibrary,
) -> Result<(), DocumentError> {
    let key = raw
        .component_key
        .clone()
        .ok_or_else(|| DocumentError::MissingComponentKey(raw.name.clone()))?;
    components.register(ComponentDefinition { key, name: raw.name.clone(), root })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_nested_tree() {
        let mut frame = RawNode::new(NodeKind::Frame, "main");
        frame.children.push({
            let mut text = RawNode::new(NodeKind::Text, "title");
            text.characters = Some("Hello".into());
            text
        });
        let raw = RawDocument { name: "doc".into(), components: Vec::new(), children: vec![frame] };

        let doc = raw.load().unwrap();
        assert_eq!(doc.arena.len(), 3); // canvas + frame + text
        let frame = doc.arena.children(doc.root)[0];
        assert_eq!(doc.node(frame).name, "main");
        let text = doc.arena.children(frame)[0];
        assert_eq!(doc.node(text).characters.as_deref(), Some("Hello"));
        assert_eq!(doc.arena.parent(text), Some(frame));
    }

    #[test]
    fn registers_detached_components() {
        let mut def = RawNode::new(NodeKind::Component, "button");
        def.component_key = Some("btn".into());
        let mut instance = RawNode::new(NodeKind::Instance, "ok");
        instance.component_key = Some("btn".into());

        let raw = RawDocument {
            name: "doc".into(),
            components: vec![def],
            children: vec![instance],
        };
        let doc = raw.load().unwrap();

        let instance = doc.arena.children(doc.root)[0];
        let definition = doc.definition_of(instance).unwrap();
        assert_eq!(definition.name, "button");
        assert_eq!(doc.arena.parent(definition.root), None);
    }

    #[test]
    fn component_without_key_is_an_error() {
        let raw = RawDocument {
            name: "doc".into(),
            components: vec![RawNode::new(NodeKind::Component, "nameless")],
            children: Vec::new(),
        };
        assert!(matches!(raw.load(), Err(DocumentError::MissingComponentKey(_))));
    }

    #[test]
    fn deserializes_from_json() {
        let doc: RawDocument = serde_json::from_str(
            r#"{
                "name": "login",
                "children": [
                    {
                        "name": "ok",
                        "type": "frame",
                        "control": "button/small",
                        "frame": { "x": 10.0, "y": 20.0, "width": 84.0, "height": 21.0 },
                        "children": [
                            { "name": "TITLE", "type": "text", "characters": "OK", "visible": false }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let loaded = doc.load().unwrap();
        let button = loaded.arena.children(loaded.root)[0];
        let control = loaded.node(button).control.unwrap();
        assert_eq!(control.control, crate::control::ControlType::Button);
        assert_eq!(control.variant, crate::control::ControlVariant::Small);
        let title = loaded.arena.children(button)[0];
        assert!(!loaded.node(title).visible);
    }
}
