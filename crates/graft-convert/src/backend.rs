//! The two backend implementations sharing the pipeline contract.

use convert_case::{Case, Casing};
use graft_core::{ConvertError, Document, NodeId};

use crate::code::{custom_name, CodeArtifact, MemberDecl, Statement};
use crate::context::RenderContext;
use crate::converter::{CodeProduction, NodeConverter, ViewProduction};
use crate::pipeline::Backend;
use crate::view::{ViewClass, ViewId, ViewTree};

/// Artifact of the view backend: a handle into the run's view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewArtifact {
    pub view: ViewId,
}

/// Live-object backend: strategies build views in a [`ViewTree`] and the
/// pipeline attaches them parent to child.
#[derive(Debug, Default)]
pub struct ViewBackend {
    pub tree: ViewTree,
    main: Option<ViewId>,
}

impl ViewBackend {
    /// Backend without a main container; top-level artifacts stay
    /// detached and are attached externally (nested/embedded runs).
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with a main container of the given class.
    pub fn with_main(class: ViewClass) -> Self {
        let mut tree = ViewTree::new();
        let main = tree.create(class);
        Self { tree, main: Some(main) }
    }

    pub fn main(&self) -> Option<ViewId> {
        self.main
    }
}

impl Backend for ViewBackend {
    type Artifact = ViewArtifact;

    fn produce(
        &mut self,
        doc: &Document,
        converter: &dyn NodeConverter,
        node: NodeId,
        _needs_constructor: bool,
        ctx: &mut RenderContext<ViewArtifact>,
    ) -> Result<ViewArtifact, ConvertError> {
        let mut production = ViewProduction { tree: &mut self.tree, options: &ctx.options };
        let view = converter.convert_to_view(doc, node, &mut production)?;
        self.tree.set_source(view, node);
        Ok(ViewArtifact { view })
    }

    fn attach(
        &mut self,
        parent: Option<&ViewArtifact>,
        child: &ViewArtifact,
        _ctx: &mut RenderContext<ViewArtifact>,
    ) {
        match parent {
            Some(parent) => self.tree.add_subview(parent.view, child.view),
            None => {
                if let Some(main) = self.main {
                    self.tree.add_subview(main, child.view);
                }
            }
        }
    }
}

/// Source-text backend: strategies append typed statements under a
/// symbolic binding; the backend owns construction, name binding, and
/// child-attachment statements.
#[derive(Debug)]
pub struct CodeBackend {
    pub statements: Vec<Statement>,
    main_binding: String,
}

impl Default for CodeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBackend {
    pub fn new() -> Self {
        Self { statements: Vec::new(), main_binding: "view".to_string() }
    }

    pub fn with_main_binding(binding: impl Into<String>) -> Self {
        Self { statements: Vec::new(), main_binding: binding.into() }
    }

    pub fn main_binding(&self) -> &str {
        &self.main_binding
    }
}

impl Backend for CodeBackend {
    type Artifact = CodeArtifact;

    fn produce(
        &mut self,
        doc: &Document,
        converter: &dyn NodeConverter,
        node: NodeId,
        needs_constructor: bool,
        ctx: &mut RenderContext<CodeArtifact>,
    ) -> Result<CodeArtifact, ConvertError> {
        let class = converter.view_class(doc, node);

        // An elided node is its parent's own construction site and binds
        // straight to the main name. Otherwise an author-quoted name binds
        // to a private member; everything else gets a generated local.
        let (binding, is_member) = if !needs_constructor {
            (self.main_binding.clone(), false)
        } else {
            let (base, is_member) = match custom_name(&doc.node(node).name) {
                Some(custom) => (custom.to_case(Case::Camel), true),
                None => (class.name().to_case(Case::Camel), false),
            };
            let mut binding = ctx.names.claim(&base);
            if binding == self.main_binding {
                binding = ctx.names.claim(&base);
            }
            (binding, is_member)
        };

        if needs_constructor {
            self.statements.push(Statement::Construct {
                binding: binding.clone(),
                class: class.name().to_string(),
                declared: !is_member,
            });
            if is_member {
                ctx.private_members.push(MemberDecl {
                    name: binding.clone(),
                    class: class.name().to_string(),
                });
            }
        }

        let mut production = CodeProduction {
            binding: &binding,
            statements: &mut self.statements,
            options: &ctx.options,
        };
        converter.convert_to_code(doc, node, &mut production)?;

        Ok(CodeArtifact {
            node,
            binding,
            class: class.name().to_string(),
            is_member,
        })
    }

    fn attach(
        &mut self,
        parent: Option<&CodeArtifact>,
        child: &CodeArtifact,
        ctx: &mut RenderContext<CodeArtifact>,
    ) {
        let parent_binding = match parent {
            Some(parent) => parent.binding.clone(),
            // Top-level artifacts attach to the main container only when
            // this run owns one; nested runs attach their output
            // externally.
            None => {
                if !ctx.options.generate_main_view {
                    return;
                }
                self.main_binding.clone()
            }
        };
        self.statements.push(Statement::AddChild {
            parent: parent_binding,
            child: child.binding.clone(),
        });
    }
}
