//! The shared traversal pipeline.
//!
//! One walk serves both backends: structural skip rules and child
//! extraction are decided here, artifact production is delegated to a
//! [`Backend`]. The walk is strictly sequential, pre-order, in child-index
//! order; both statement order and subview z-order follow source order.

use graft_core::{ConvertError, Document, NodeId, NodeKind};

use crate::context::RenderContext;
use crate::converter::NodeConverter;
use crate::registry::ConverterRegistry;

/// Output-producing side of a conversion run. Implementations produce
/// either live view objects or source statements; the traversal policy is
/// identical for both.
pub trait Backend {
    type Artifact: Clone;

    /// Produce the artifact for `node` using the resolved strategy.
    /// `needs_constructor` is false only when the node is the first
    /// element rendered directly into a parent that itself declares the
    /// construction site.
    fn produce(
        &mut self,
        doc: &Document,
        converter: &dyn NodeConverter,
        node: NodeId,
        needs_constructor: bool,
        ctx: &mut RenderContext<Self::Artifact>,
    ) -> Result<Self::Artifact, ConvertError>;

    /// Attach `child` to `parent` (`None` = the run's main container).
    fn attach(
        &mut self,
        parent: Option<&Self::Artifact>,
        child: &Self::Artifact,
        ctx: &mut RenderContext<Self::Artifact>,
    );
}

/// One converted node in traversal order, consumed by the layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedNode<A> {
    pub node: NodeId,
    /// Design node whose artifact this one was attached into; `None` for
    /// artifacts attached to the main container. Flattened ancestors do
    /// not appear here.
    pub attached_to: Option<NodeId>,
    pub artifact: A,
}

/// Walk `root` and produce artifacts through `backend`.
///
/// The caller owns run scoping: clear `ctx` to start a fresh run. Nodes
/// already in the cache are re-entered idempotently, with no new strategy
/// resolution or production side effects.
pub fn render<B: Backend>(
    doc: &Document,
    registry: &ConverterRegistry,
    backend: &mut B,
    ctx: &mut RenderContext<B::Artifact>,
    root: NodeId,
) -> Result<Vec<ProcessedNode<B::Artifact>>, ConvertError> {
    let mut walker = Walker {
        doc,
        registry,
        backend,
        ctx,
        processed: Vec::new(),
        main_children: 0,
    };
    walker.visit(root, None, None, true)?;
    Ok(walker.processed)
}

struct Walker<'a, B: Backend> {
    doc: &'a Document,
    registry: &'a ConverterRegistry,
    backend: &'a mut B,
    ctx: &'a mut RenderContext<B::Artifact>,
    processed: Vec<ProcessedNode<B::Artifact>>,
    /// Artifacts rendered directly into the main container so far.
    main_children: usize,
}

impl<B: Backend> Walker<'_, B> {
    fn visit(
        &mut self,
        node: NodeId,
        parent: Option<&B::Artifact>,
        parent_node: Option<NodeId>,
        parent_is_main: bool,
    ) -> Result<(), ConvertError> {
        let design = self.doc.node(node);
        if !design.visible {
            log::trace!("node {node} '{}' is hidden", design.name);
            return Ok(());
        }

        // Idempotent re-entry: a node reachable through more than one
        // path keeps its first artifact and triggers nothing else.
        if self.ctx.cache.contains(node) {
            log::trace!("node {node} already processed");
            return Ok(());
        }

        // An instance whose definition cannot be located fails the run;
        // there is no valid subtree for layout or attachment to use.
        if design.kind == NodeKind::Instance {
            self.doc.require_definition(node)?;
        }

        // Structural skip rules are evaluated before strategy resolution.
        // A skipped node contributes no artifact; its logical content is
        // rendered in its place.
        if self.is_skipped(node) {
            let replacement = self.children_to_render(node);
            for child in replacement {
                self.visit(child, parent, parent_node, parent_is_main)?;
            }
            return Ok(());
        }

        let Some(converter) = self.registry.resolve(self.doc, node) else {
            // Non-convertible: flatten. Children render as direct
            // siblings under this node's parent, order preserved.
            log::debug!("flattening node {node} '{}'", design.name);
            let children = self.children_to_render(node);
            for child in children {
                self.visit(child, parent, parent_node, parent_is_main)?;
            }
            return Ok(());
        };

        let needs_constructor = !(parent_is_main
            && self.main_children == 0
            && self.ctx.options.renders_constructor_first_element);

        let artifact =
            self.backend.produce(self.doc, converter, node, needs_constructor, self.ctx)?;
        if needs_constructor {
            self.backend.attach(parent, &artifact, self.ctx);
        }
        if parent_is_main {
            self.main_children += 1;
        }

        // Record before recursing so a child circling back to an ancestor
        // through a component instance terminates via re-entry.
        self.ctx.cache.insert(node, artifact.clone());
        self.processed.push(ProcessedNode {
            node,
            attached_to: parent_node,
            artifact: artifact.clone(),
        });

        if converter.scan_children(self.doc, node) {
            let children = self.children_to_render(node);
            for child in children {
                self.visit(child, Some(&artifact), Some(node), false)?;
            }
        }
        Ok(())
    }

    fn is_skipped(&self, node: NodeId) -> bool {
        self.doc.is_root_content(node)
            || self.doc.is_dialog_container(node, None)
            || self.doc.is_window_content(node)
    }

    fn children_to_render(&self, node: NodeId) -> Vec<NodeId> {
        let design = self.doc.node(node);
        if design.is_compound_vector() {
            return Vec::new();
        }
        if self.doc.is_dialog_container(node, None) {
            // A dialog container that is itself an instance is rendered
            // through its component; nothing to extract here.
            if design.kind == NodeKind::Instance {
                return Vec::new();
            }
            if let Some(content) = self.doc.window_content(node) {
                return self.doc.arena.children(content).to_vec();
            }
            // Malformed container: no content node. Recover with every
            // child except the instance that represents the dialog itself.
            log::warn!("dialog container {node} '{}' has no content node", design.name);
            let instance = self.doc.dialog_instance(node);
            return self
                .doc
                .arena
                .children(node)
                .iter()
                .copied()
                .filter(|&child| Some(child) != instance)
                .collect();
        }
        self.doc.content_children(node).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use graft_core::{
        ComponentDefinition, ComponentLibrary, ControlClass, ControlType, DesignNode, NodeArena,
    };

    use super::*;
    use crate::backend::{ViewArtifact, ViewBackend};
    use crate::context::RenderOptions;
    use crate::converter::{CodeProduction, ViewProduction};
    use crate::view::{ViewClass, ViewId, ViewValue};

    /// Converts nodes whose name starts with a prefix; counts invocations.
    struct PrefixConverter {
        prefix: &'static str,
        class: ViewClass,
        descend: bool,
        resolutions: Arc<AtomicUsize>,
        productions: Arc<AtomicUsize>,
    }

    impl PrefixConverter {
        fn new(prefix: &'static str, class: ViewClass) -> Self {
            Self {
                prefix,
                class,
                descend: true,
                resolutions: Arc::new(AtomicUsize::new(0)),
                productions: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn leaf(prefix: &'static str, class: ViewClass) -> Self {
            Self { descend: false, ..Self::new(prefix, class) }
        }

        fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
            (Arc::clone(&self.resolutions), Arc::clone(&self.productions))
        }
    }

    impl NodeConverter for PrefixConverter {
        fn can_convert(&self, doc: &Document, node: NodeId) -> bool {
            self.resolutions.fetch_add(1, Ordering::Relaxed);
            doc.node(node).name.starts_with(self.prefix)
        }

        fn view_class(&self, _doc: &Document, _node: NodeId) -> ViewClass {
            self.class
        }

        fn scan_children(&self, _doc: &Document, _node: NodeId) -> bool {
            self.descend
        }

        fn convert_to_view(
            &self,
            doc: &Document,
            node: NodeId,
            production: &mut ViewProduction<'_>,
        ) -> Result<ViewId, ConvertError> {
            self.productions.fetch_add(1, Ordering::Relaxed);
            let view = production.tree.create(self.class);
            production.tree.set_property(
                view,
                "name",
                ViewValue::Str(doc.node(node).name.clone()),
            );
            Ok(view)
        }

        fn convert_to_code(
            &self,
            _doc: &Document,
            _node: NodeId,
            _production: &mut CodeProduction<'_>,
        ) -> Result<(), ConvertError> {
            self.productions.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    fn empty_doc() -> (NodeArena, ComponentLibrary) {
        (NodeArena::new(), ComponentLibrary::new())
    }

    fn render_views(
        doc: &Document,
        registry: &ConverterRegistry,
    ) -> (ViewBackend, Vec<ProcessedNode<ViewArtifact>>) {
        let mut backend = ViewBackend::with_main(ViewClass::VIEW);
        let mut ctx = RenderContext::new(RenderOptions::default());
        let processed = render(doc, registry, &mut backend, &mut ctx, doc.root).unwrap();
        (backend, processed)
    }

    #[test]
    fn child_order_is_preserved() {
        let (mut arena, components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let frame = arena.insert(DesignNode::new(NodeKind::Frame, "box main"), Some(root));
        for name in ["item a", "item b", "item c"] {
            arena.insert(DesignNode::new(NodeKind::Text, name), Some(frame));
        }
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::new("box", ViewClass::VIEW));
        registry.register(PrefixConverter::leaf("item", ViewClass::LABEL));

        let (backend, processed) = render_views(&doc, &registry);
        let names: Vec<String> = processed
            .iter()
            .map(|p| doc.node(p.node).name.clone())
            .collect();
        assert_eq!(names, vec!["box main", "item a", "item b", "item c"]);

        // Subview add-order follows source order too.
        let container = processed[0].artifact.view;
        let labels: Vec<&str> = backend
            .tree
            .view(container)
            .subviews()
            .iter()
            .map(|&v| backend.tree.view(v).property("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["item a", "item b", "item c"]);
    }

    #[test]
    fn flattening_is_transparent() {
        // A group no strategy accepts contributes nothing of its own; its
        // children surface as direct siblings.
        let (mut arena, components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let wrapper = arena.insert(DesignNode::new(NodeKind::Group, "decoration"), Some(root));
        let a = arena.insert(DesignNode::new(NodeKind::Text, "item a"), Some(wrapper));
        let b = arena.insert(DesignNode::new(NodeKind::Text, "item b"), Some(wrapper));
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::leaf("item", ViewClass::LABEL));

        let (backend, processed) = render_views(&doc, &registry);
        let converted: Vec<NodeId> = processed.iter().map(|p| p.node).collect();
        assert_eq!(converted, vec![a, b]);

        // Both attach straight to the main container.
        let main = backend.main().unwrap();
        assert_eq!(backend.tree.view(main).subviews().len(), 2);
        assert!(processed.iter().all(|p| p.attached_to.is_none()));
    }

    #[test]
    fn re_rendering_is_idempotent() {
        let (mut arena, components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let item = arena.insert(DesignNode::new(NodeKind::Text, "item a"), Some(root));
        let doc = Document::new(arena, components, root);

        let converter = PrefixConverter::leaf("item", ViewClass::LABEL);
        let (resolutions, productions) = converter.counters();
        let mut registry = ConverterRegistry::new();
        registry.register(converter);

        let mut backend = ViewBackend::with_main(ViewClass::VIEW);
        let mut ctx = RenderContext::new(RenderOptions::default());
        let first = render(&doc, &registry, &mut backend, &mut ctx, doc.root).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(ctx.cache.len(), 1);
        assert_eq!(productions.load(Ordering::Relaxed), 1);

        // Re-rendering a cached node within the same run: no new strategy
        // resolution, no production, no second attachment.
        let resolutions_before = resolutions.load(Ordering::Relaxed);
        let views_before = backend.tree.len();
        let second = render(&doc, &registry, &mut backend, &mut ctx, item).unwrap();
        assert!(second.is_empty());
        assert_eq!(backend.tree.len(), views_before);
        assert_eq!(productions.load(Ordering::Relaxed), 1);
        assert_eq!(resolutions.load(Ordering::Relaxed), resolutions_before);
        let main = backend.main().unwrap();
        assert_eq!(backend.tree.view(main).subviews().len(), 1);
    }

    #[test]
    fn skipped_nodes_never_reach_a_strategy() {
        // Dialog parent container: accepted by a catch-all converter, but
        // the skip rule wins and only the content children are emitted.
        let (mut arena, mut components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let def_root = arena.insert(
            DesignNode::new(NodeKind::Component, "window")
                .with_component_key("win")
                .with_control(ControlClass::new(ControlType::Window)),
            None,
        );
        let dialog = arena.insert(DesignNode::new(NodeKind::Group, "dialog"), Some(root));
        arena.insert(
            DesignNode::new(NodeKind::Instance, "window chrome").with_component_key("win"),
            Some(dialog),
        );
        let content = arena.insert(DesignNode::new(NodeKind::Frame, "content"), Some(dialog));
        let item = arena.insert(DesignNode::new(NodeKind::Text, "item ok"), Some(content));
        components
            .register(ComponentDefinition { key: "win".into(), name: "window".into(), root: def_root })
            .unwrap();
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::leaf("item", ViewClass::LABEL));
        // Converters that would happily accept the dialog or content node.
        registry.register(PrefixConverter::new("dialog", ViewClass::VIEW));
        registry.register(PrefixConverter::new("content", ViewClass::VIEW));

        let (_, processed) = render_views(&doc, &registry);
        let converted: Vec<NodeId> = processed.iter().map(|p| p.node).collect();
        assert_eq!(converted, vec![item], "only the content's children are emitted");
    }

    #[test]
    fn malformed_container_recovers_without_the_dialog_instance() {
        // A dialog container with no content node renders every child
        // except the instance that represents the dialog itself.
        let (mut arena, mut components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let def_root = arena.insert(
            DesignNode::new(NodeKind::Component, "window")
                .with_component_key("win")
                .with_control(ControlClass::new(ControlType::Window)),
            None,
        );
        let dialog = arena.insert(DesignNode::new(NodeKind::Group, "dialog"), Some(root));
        arena.insert(
            DesignNode::new(NodeKind::Instance, "window chrome").with_component_key("win"),
            Some(dialog),
        );
        let stray = arena.insert(DesignNode::new(NodeKind::Text, "item stray"), Some(dialog));
        components
            .register(ComponentDefinition { key: "win".into(), name: "window".into(), root: def_root })
            .unwrap();
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::leaf("item", ViewClass::LABEL));
        registry.register(PrefixConverter::leaf("window", ViewClass::BUTTON));

        let (_, processed) = render_views(&doc, &registry);
        let converted: Vec<NodeId> = processed.iter().map(|p| p.node).collect();
        assert_eq!(converted, vec![stray]);
    }

    #[test]
    fn distinct_instances_share_a_definition_but_not_artifacts() {
        let (mut arena, mut components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let def_root = arena.insert(
            DesignNode::new(NodeKind::Component, "item button").with_component_key("btn"),
            None,
        );
        arena.insert(
            DesignNode::new(NodeKind::Instance, "item ok").with_component_key("btn"),
            Some(root),
        );
        arena.insert(
            DesignNode::new(NodeKind::Instance, "item cancel").with_component_key("btn"),
            Some(root),
        );
        components
            .register(ComponentDefinition { key: "btn".into(), name: "item button".into(), root: def_root })
            .unwrap();
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::leaf("item", ViewClass::BUTTON));

        let (backend, processed) = render_views(&doc, &registry);
        assert_eq!(processed.len(), 2);
        assert_ne!(processed[0].artifact, processed[1].artifact);
        assert_eq!(
            backend.tree.view(processed[0].artifact.view).class,
            backend.tree.view(processed[1].artifact.view).class,
        );
    }

    #[test]
    fn unresolved_instance_fails_the_run() {
        let (mut arena, components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        arena.insert(
            DesignNode::new(NodeKind::Instance, "item ghost").with_component_key("missing"),
            Some(root),
        );
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::leaf("item", ViewClass::BUTTON));

        let mut backend = ViewBackend::with_main(ViewClass::VIEW);
        let mut ctx = RenderContext::new(RenderOptions::default());
        let result = render(&doc, &registry, &mut backend, &mut ctx, doc.root);
        assert!(matches!(
            result,
            Err(ConvertError::UnresolvedComponent { component, .. }) if component == "missing"
        ));
    }

    #[test]
    fn vector_compounds_are_opaque_leaves() {
        let (mut arena, components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        let shape = arena.insert(DesignNode::new(NodeKind::BooleanOp, "item shape"), Some(root));
        arena.insert(DesignNode::new(NodeKind::Vector, "item inner"), Some(shape));
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::new("item", ViewClass::BOX));

        let (_, processed) = render_views(&doc, &registry);
        let converted: Vec<NodeId> = processed.iter().map(|p| p.node).collect();
        assert_eq!(converted, vec![shape], "children of a boolean compound are not descended");
    }

    #[test]
    fn hidden_nodes_are_invisible_to_the_output() {
        let (mut arena, components) = empty_doc();
        let root = arena.insert(DesignNode::new(NodeKind::Canvas, "page"), None);
        arena.insert(DesignNode::new(NodeKind::Text, "item shown"), Some(root));
        arena.insert(DesignNode::new(NodeKind::Text, "item hidden").hidden(), Some(root));
        let doc = Document::new(arena, components, root);

        let mut registry = ConverterRegistry::new();
        registry.register(PrefixConverter::leaf("item", ViewClass::LABEL));

        let (_, processed) = render_views(&doc, &registry);
        assert_eq!(processed.len(), 1);
        assert_eq!(doc.node(processed[0].node).name, "item shown");
    }
}
