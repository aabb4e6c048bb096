//! Ordered strategy registry.

use graft_core::{Document, NodeId};

use crate::converter::NodeConverter;

/// Registry of conversion strategies in priority order: the first
/// registered strategy whose predicate accepts a node wins, so overlapping
/// strategies (e.g. "help button" before "generic button") tie-break by
/// registration order.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn NodeConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: NodeConverter + 'static>(&mut self, converter: C) {
        self.converters.push(Box::new(converter));
    }

    pub fn register_boxed(&mut self, converter: Box<dyn NodeConverter>) {
        self.converters.push(converter);
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Resolve the single applicable strategy for `node`. Pure selection;
    /// `None` means "leaf/opaque: flatten, do not emit", which is an
    /// expected outcome for decorative nodes, not an error.
    pub fn resolve(&self, doc: &Document, node: NodeId) -> Option<&dyn NodeConverter> {
        let resolved = self
            .converters
            .iter()
            .find(|converter| converter.can_convert(doc, node))
            .map(Box::as_ref);
        if resolved.is_none() {
            log::trace!("no strategy for node {} '{}'", node, doc.node(node).name);
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{CodeProduction, ViewProduction};
    use crate::view::{ViewClass, ViewId};
    use graft_core::{ConvertError, DesignNode, NodeArena, NodeKind};

    struct NamedConverter {
        accepts: &'static str,
        class: ViewClass,
    }

    impl NodeConverter for NamedConverter {
        fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
            doc.node(node).name == self.accepts
        }

        fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
            self.class
        }

        fn convert_to_view(
            &self,
            _doc: &Document,
            _node: NodeId,
            production: &mut ViewProduction<'_>,
        ) -> Result<ViewId, ConvertError> {
            Ok(production.tree.create(self.class))
        }

        fn convert_to_code(
            &self,
            _doc: &Document,
            _node: NodeId,
            _production: &mut CodeProduction<'_>,
        ) -> Result<(), ConvertError> {
            Ok(())
        }
    }

    fn doc_with_node(name: &str) -> (Document, NodeId) {
        let mut arena = NodeArena::new();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let node = arena.insert(DesignNode::new(NodeKind::Frame, name), Some(root));
        (Document::new(arena, graft_core::ComponentLibrary::new(), root), node)
    }

    #[test]
    fn earliest_registration_wins() {
        let mut registry = ConverterRegistry::new();
        registry.register(NamedConverter { accepts: "a", class: ViewClass::BUTTON });
        registry.register(NamedConverter { accepts: "a", class: ViewClass::LABEL });

        let (doc, node) = doc_with_node("a");
        let resolved = registry.resolve(&doc, node).unwrap();
        assert_eq!(resolved.view_class(&doc, node), ViewClass::BUTTON);
    }

    #[test]
    fn no_match_is_none() {
        let mut registry = ConverterRegistry::new();
        registry.register(NamedConverter { accepts: "a", class: ViewClass::BUTTON });

        let (doc, node) = doc_with_node("b");
        assert!(registry.resolve(&doc, node).is_none());
    }
}
