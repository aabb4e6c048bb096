//! The arena-backed design node tree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::control::ControlClass;
use crate::geometry::{Pinning, Rect};

/// Index of a node in a [`NodeArena`]. Stable for the lifetime of the
/// arena; node identity for caching and parent lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag of a design node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Document root / page.
    Canvas,
    Frame,
    Group,
    Text,
    Vector,
    /// Boolean operation over vector children; opaque to traversal.
    BooleanOp,
    /// Placement of a component definition.
    Instance,
    /// Root of a reusable component definition.
    Component,
}

/// Horizontal text alignment of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// One node of the design document. Immutable after the document is
/// loaded; children and parent links live in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignNode {
    /// Author-assigned name, used for semantic matching ("title", "close").
    pub name: String,
    pub kind: NodeKind,
    pub visible: bool,
    /// Position and size relative to the parent's coordinate space.
    pub frame: Rect,
    pub pinning: Pinning,
    /// Optional control classification annotation.
    pub control: Option<ControlClass>,
    /// Characters of a text run (`Text` nodes only).
    pub characters: Option<String>,
    pub text_align: TextAlign,
    /// Component key referenced by `Instance` nodes, or carried by a
    /// `Component` definition root.
    pub component_key: Option<String>,
}

impl DesignNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            frame: Rect::default(),
            pinning: Pinning::default(),
            control: None,
            characters: None,
            text_align: TextAlign::default(),
            component_key: None,
        }
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_pinning(mut self, pinning: Pinning) -> Self {
        self.pinning = pinning;
        self
    }

    pub fn with_control(mut self, control: ControlClass) -> Self {
        self.control = Some(control);
        self
    }

    pub fn with_characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    pub fn with_component_key(mut self, key: impl Into<String>) -> Self {
        self.component_key = Some(key.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Vector-like compound nodes are opaque leaves to the traversal.
    pub fn is_compound_vector(&self) -> bool {
        matches!(self.kind, NodeKind::Vector | NodeKind::BooleanOp)
    }
}

struct Entry {
    node: DesignNode,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Arena owning every node of a document, including detached component
/// definition subtrees. Children are arena indices in authored order;
/// parents are reverse indices maintained on insert.
#[derive(Default)]
pub struct NodeArena {
    entries: Vec<Entry>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or as a detached root when `None`),
    /// appended after any existing siblings.
    pub fn insert(&mut self, node: DesignNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.entries.len() as u32);
        self.entries.push(Entry { node, parent, children: SmallVec::new() });
        if let Some(parent) = parent {
            self.entries[parent.index()].children.push(id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &DesignNode {
        &self.entries[id.index()].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.index()].parent
    }

    /// Children in authored order. Order is traversal-significant: it
    /// determines emitted statement order and z-order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.index()].children
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.entries.len() as u32).map(NodeId)
    }

    /// Walk from `id` towards the root, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { arena: self, current: self.parent(id) }
    }

    /// First visible child matching `predicate`, in child order. Hidden
    /// candidates are never selected, regardless of order.
    pub fn first_visible_child<P>(&self, id: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&DesignNode) -> bool,
    {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.node(child).visible)
            .find(|&child| predicate(self.node(child)))
    }

    /// First visible child with the given author name.
    pub fn visible_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.first_visible_child(id, |node| node.name == name)
    }

    pub fn has_visible_child_named(&self, id: NodeId, name: &str) -> bool {
        self.visible_child_named(id, name).is_some()
    }
}

/// Iterator over ancestors, nearest first.
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.arena.parent(id);
        Some(id)
    }
}
