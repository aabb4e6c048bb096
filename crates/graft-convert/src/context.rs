//! Run-scoped state threaded through a conversion run.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use graft_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::code::MemberDecl;

/// Options of a single conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Wrap text labels in a localization call instead of quoting them.
    pub translate_labels: bool,
    /// Elide the constructor of the first element rendered directly into
    /// the main container (the parent already declares the construction
    /// site).
    pub renders_constructor_first_element: bool,
    /// Emit constraint statements instead of absolute frames (code
    /// backend layout).
    pub use_constraints: bool,
    /// Produce/configure the main container itself. Disabled for nested
    /// runs whose output is attached externally.
    pub generate_main_view: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            translate_labels: false,
            renders_constructor_first_element: false,
            use_constraints: false,
            generate_main_view: true,
        }
    }
}

/// Identity-keyed store of artifacts produced in the current run. A node
/// reachable through more than one path (definition vs. instance, window
/// content re-entry) produces exactly one artifact.
#[derive(Debug)]
pub struct ProcessedCache<A> {
    entries: HashMap<NodeId, A>,
}

impl<A> Default for ProcessedCache<A> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<A> ProcessedCache<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&A> {
        self.entries.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn insert(&mut self, node: NodeId, artifact: A) {
        self.entries.insert(node, artifact);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stale entries across runs are a correctness bug, not a performance
    /// concern: cached artifacts bake in run options.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Uniquifying name table for generated bindings: `okButton`,
/// `okButton1`, `okButton2`, ...
#[derive(Debug, Default)]
pub struct NameTable {
    counters: HashMap<String, usize>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str) -> String {
        match self.counters.entry(base.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(1);
                base.to_string()
            }
            Entry::Occupied(mut occupied) => {
                let n = *occupied.get();
                *occupied.get_mut() = n + 1;
                format!("{base}{n}")
            }
        }
    }

    pub fn clear(&mut self) {
        self.counters.clear();
    }
}

/// Everything a run mutates, created at run start and discarded (or
/// explicitly cleared) afterwards. Never process-wide: concurrent runs
/// each own one.
#[derive(Debug)]
pub struct RenderContext<A> {
    pub options: RenderOptions,
    pub cache: ProcessedCache<A>,
    /// Member declarations accumulated by the code backend.
    pub private_members: Vec<MemberDecl>,
    pub names: NameTable,
}

impl<A> RenderContext<A> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            cache: ProcessedCache::new(),
            private_members: Vec::new(),
            names: NameTable::new(),
        }
    }

    /// Reset all run-scoped state. Required between runs when the same
    /// context value is reused.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.private_members.clear();
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_generates_main_view() {
        let options = RenderOptions::default();
        assert!(options.generate_main_view);
        assert!(!options.translate_labels);
        assert!(!options.use_constraints);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: RenderOptions =
            serde_json::from_str(r#"{ "translateLabels": true }"#).unwrap();
        assert!(options.translate_labels);
        assert!(options.generate_main_view);
    }

    #[test]
    fn name_table_uniquifies() {
        let mut names = NameTable::new();
        assert_eq!(names.claim("button"), "button");
        assert_eq!(names.claim("button"), "button1");
        assert_eq!(names.claim("button"), "button2");
        assert_eq!(names.claim("label"), "label");
    }

    #[test]
    fn clear_resets_run_state() {
        let mut ctx: RenderContext<u32> = RenderContext::new(RenderOptions::default());
        ctx.cache.insert(dummy_node(), 7);
        ctx.private_members.push(MemberDecl { name: "b".into(), class: "Button".into() });
        ctx.names.claim("button");

        ctx.clear();
        assert!(ctx.cache.is_empty());
        assert!(ctx.private_members.is_empty());
        assert_eq!(ctx.names.claim("button"), "button");
    }

    fn dummy_node() -> NodeId {
        use graft_core::{DesignNode, NodeArena, NodeKind};
        let mut arena = NodeArena::new();
        arena.insert(DesignNode::new(NodeKind::Frame, "f"), None)
    }
}
