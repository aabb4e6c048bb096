//! The live view-object backend's output model.
//!
//! Views live in an id-indexed tree the same way design nodes do; the
//! host toolkit adapter walks the finished tree and materializes real
//! widgets. Properties are kept in insertion order so emitted output is
//! deterministic.

use graft_core::{NodeId, Rect};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Index of a view in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u32);

impl ViewId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Target class of a produced view. An open set: bundled strategies use
/// the associated constants, external plugins may introduce their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewClass(pub &'static str);

impl ViewClass {
    pub const VIEW: ViewClass = ViewClass("View");
    pub const WINDOW: ViewClass = ViewClass("Window");
    pub const BUTTON: ViewClass = ViewClass("Button");
    pub const COMBO_BOX: ViewClass = ViewClass("ComboBox");
    pub const POP_UP_BUTTON: ViewClass = ViewClass("PopUpButton");
    pub const LABEL: ViewClass = ViewClass("Label");
    pub const TEXT_FIELD: ViewClass = ViewClass("TextField");
    pub const PROGRESS_INDICATOR: ViewClass = ViewClass("ProgressIndicator");
    pub const BOX: ViewClass = ViewClass("Box");

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ViewClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// A property value on a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Keyword(&'static str),
}

impl ViewValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ViewValue::Str(s) => Some(s),
            ViewValue::Keyword(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ViewValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ViewValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// One retained view object.
#[derive(Debug)]
pub struct ViewNode {
    pub class: ViewClass,
    /// Design node this view was produced from, when any.
    pub source: Option<NodeId>,
    /// Final frame, assigned by the layout pass.
    pub frame: Option<Rect>,
    properties: IndexMap<String, ViewValue>,
    subviews: SmallVec<[ViewId; 4]>,
}

impl ViewNode {
    fn new(class: ViewClass) -> Self {
        Self {
            class,
            source: None,
            frame: None,
            properties: IndexMap::new(),
            subviews: SmallVec::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&ViewValue> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &ViewValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn subviews(&self) -> &[ViewId] {
        &self.subviews
    }
}

/// Arena of produced views with parent/child attachment.
#[derive(Debug, Default)]
pub struct ViewTree {
    views: Vec<ViewNode>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached view of the given class.
    pub fn create(&mut self, class: ViewClass) -> ViewId {
        let id = ViewId(self.views.len() as u32);
        self.views.push(ViewNode::new(class));
        id
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn view(&self, id: ViewId) -> &ViewNode {
        &self.views[id.index()]
    }

    /// Append `child` to `parent`'s subviews. Add-order is z-order.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        self.views[parent.index()].subviews.push(child);
    }

    pub fn set_property(&mut self, id: ViewId, key: impl Into<String>, value: ViewValue) {
        self.views[id.index()].properties.insert(key.into(), value);
    }

    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        self.views[id.index()].frame = Some(frame);
    }

    pub fn set_source(&mut self, id: ViewId, source: NodeId) {
        self.views[id.index()].source = Some(source);
    }
}
