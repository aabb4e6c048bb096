//! Loaded document: arena + component library + structural queries.

use crate::component::{ComponentDefinition, ComponentLibrary};
use crate::control::{ControlClass, ControlType};
use crate::error::ConvertError;
use crate::node::{DesignNode, NodeArena, NodeId, NodeKind};

/// Name of the canonical content node beneath a window/dialog container.
pub const CONTENT_NODE_NAME: &str = "content";
/// Name of the chrome options node inside a window component.
pub const OPTIONS_NODE_NAME: &str = "options";

/// A fully loaded design document. Immutable during conversion runs and
/// therefore safe to share across concurrent runs by reference.
pub struct Document {
    pub arena: NodeArena,
    pub components: ComponentLibrary,
    /// Root canvas node.
    pub root: NodeId,
}

impl Document {
    pub fn new(arena: NodeArena, components: ComponentLibrary, root: NodeId) -> Self {
        Self { arena, components, root }
    }

    pub fn node(&self, id: NodeId) -> &DesignNode {
        self.arena.node(id)
    }

    /// Definition referenced by an instance (or carried by a definition
    /// root). Pure lookup; `None` when the node carries no key or the key
    /// is unknown.
    pub fn definition_of(&self, id: NodeId) -> Option<&ComponentDefinition> {
        let key = self.node(id).component_key.as_deref()?;
        self.components.resolve(key)
    }

    /// Like [`Self::definition_of`], but an unknown key on an instance is
    /// a run-level failure.
    pub fn require_definition(&self, id: NodeId) -> Result<&ComponentDefinition, ConvertError> {
        let key = match self.node(id).component_key.as_deref() {
            Some(key) => key,
            None => {
                return Err(ConvertError::UnresolvedComponent {
                    node: id,
                    component: String::new(),
                })
            }
        };
        self.components.resolve(key).ok_or_else(|| ConvertError::UnresolvedComponent {
            node: id,
            component: key.to_string(),
        })
    }

    /// Control classification of a node: its own annotation, or, for an
    /// instance, the annotation of (or parsed from the name of) the
    /// component it references.
    pub fn control_class(&self, id: NodeId) -> Option<ControlClass> {
        let node = self.node(id);
        if let Some(control) = node.control {
            return Some(control);
        }
        let definition = self.definition_of(id)?;
        self.arena
            .node(definition.root)
            .control
            .or_else(|| ControlClass::parse(&definition.name))
    }

    /// Children to inspect for a node's logical content: an instance
    /// without children of its own shares its definition's subtree.
    pub fn content_children(&self, id: NodeId) -> &[NodeId] {
        let own = self.arena.children(id);
        if own.is_empty() && self.node(id).kind == NodeKind::Instance {
            if let Some(definition) = self.definition_of(id) {
                return self.arena.children(definition.root);
            }
        }
        own
    }

    /// First visible logical child matching `predicate`.
    pub fn first_visible_content_child<P>(&self, id: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&DesignNode) -> bool,
    {
        self.content_children(id)
            .iter()
            .copied()
            .filter(|&child| self.node(child).visible)
            .find(|&child| predicate(self.node(child)))
    }

    pub fn visible_content_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.first_visible_content_child(id, |node| node.name == name)
    }

    pub fn has_visible_content_child_named(&self, id: NodeId, name: &str) -> bool {
        self.visible_content_child_named(id, name).is_some()
    }

    /// The instance node that represents the dialog/window component
    /// inside a parent container, if any.
    pub fn dialog_instance(&self, id: NodeId) -> Option<NodeId> {
        self.arena
            .children(id)
            .iter()
            .copied()
            .filter(|&child| self.node(child).visible)
            .find(|&child| {
                self.node(child).kind == NodeKind::Instance
                    && self
                        .control_class(child)
                        .is_some_and(|class| class.control.is_window())
            })
    }

    /// Whether `id` is the designated parent container of a modal
    /// dialog/sheet/window, optionally restricted to one window type.
    pub fn is_dialog_container(&self, id: NodeId, filter: Option<ControlType>) -> bool {
        let kind = self.node(id).kind;
        if !matches!(kind, NodeKind::Frame | NodeKind::Group | NodeKind::Component) {
            return false;
        }
        match self.dialog_instance(id) {
            Some(instance) => match filter {
                Some(control) => self
                    .control_class(instance)
                    .is_some_and(|class| class.control == control),
                None => true,
            },
            None => false,
        }
    }

    /// The canonical content node of a window/dialog container.
    pub fn window_content(&self, id: NodeId) -> Option<NodeId> {
        self.arena.visible_child_named(id, CONTENT_NODE_NAME)
    }

    /// Whether `id` is the canonically recognized content node of a
    /// window/dialog container.
    pub fn is_window_content(&self, id: NodeId) -> bool {
        self.node(id).name == CONTENT_NODE_NAME
            && self
                .arena
                .parent(id)
                .is_some_and(|parent| self.is_dialog_container(parent, None))
    }

    /// Whether `id` is the root content frame directly under a canvas.
    pub fn is_root_content(&self, id: NodeId) -> bool {
        self.node(id).kind == NodeKind::Frame
            && self
                .arena
                .parent(id)
                .is_some_and(|parent| self.node(parent).kind == NodeKind::Canvas)
    }
}

/// Window chrome resolved from a dialog container: title and visibility of
/// the standard window controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowChrome {
    pub title: Option<String>,
    pub close_button_hidden: bool,
    pub min_button_hidden: bool,
    pub max_button_hidden: bool,
}

impl WindowChrome {
    /// Resolve chrome for a dialog/window parent container. The chrome
    /// controls are searched in the window component's `options` node when
    /// present, falling back to the container's content node. `None` when
    /// the container exposes neither.
    pub fn resolve(doc: &Document, container: NodeId) -> Option<WindowChrome> {
        let instance = doc.dialog_instance(container);
        let scope = instance
            .and_then(|instance| doc.visible_content_child_named(instance, OPTIONS_NODE_NAME))
            .or_else(|| doc.window_content(container))
            .or(instance)?;

        let title = doc
            .first_visible_content_child(scope, |node| node.is_text() && node.name == "title")
            .and_then(|id| doc.node(id).characters.clone());

        Some(WindowChrome {
            title,
            close_button_hidden: !doc.has_visible_content_child_named(scope, "close"),
            min_button_hidden: !doc.has_visible_content_child_named(scope, "min"),
            max_button_hidden: !doc.has_visible_content_child_named(scope, "max"),
        })
    }
}
