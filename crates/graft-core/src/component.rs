//! Component definition library.
//!
//! Definitions are named reusable subtrees owned by the arena; instances
//! hold a key and share the definition. Resolution is a pure lookup with
//! no side effects, so both backends (and concurrent runs) may resolve
//! the same instance freely.

use indexmap::IndexMap;

use crate::error::DocumentError;
use crate::node::NodeId;

/// A named, reusable subtree referenced by zero or more instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
    /// Stable key instances reference.
    pub key: String,
    /// Author-facing component name (also carries the control annotation
    /// for native-control components, e.g. `"button/small"`).
    pub name: String,
    /// Root node of the definition subtree.
    pub root: NodeId,
}

/// Registry of component definitions keyed by component key, in
/// registration order.
#[derive(Default)]
pub struct ComponentLibrary {
    definitions: IndexMap<String, ComponentDefinition>,
}

impl ComponentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ComponentDefinition) -> Result<(), DocumentError> {
        if self.definitions.contains_key(&definition.key) {
            return Err(DocumentError::DuplicateComponentKey(definition.key));
        }
        self.definitions.insert(definition.key.clone(), definition);
        Ok(())
    }

    /// Pure lookup of the definition behind a key.
    pub fn resolve(&self, key: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(key)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut library = ComponentLibrary::new();
        library
            .register(ComponentDefinition {
                key: "btn".into(),
                name: "button".into(),
                root: NodeId(0),
            })
            .unwrap();

        assert_eq!(library.resolve("btn").map(|d| d.name.as_str()), Some("button"));
        assert!(library.resolve("missing").is_none());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut library = ComponentLibrary::new();
        let def = ComponentDefinition { key: "btn".into(), name: "button".into(), root: NodeId(0) };
        library.register(def.clone()).unwrap();
        assert!(matches!(
            library.register(def),
            Err(DocumentError::DuplicateComponentKey(_))
        ));
    }
}
