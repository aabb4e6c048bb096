//! Front doors for the two backends.
//!
//! A service owns one conversion run: it builds the run context, seeds the
//! main container (including window chrome when the root is a dialog
//! container), drives the pipeline, and hands the flat processed list to
//! the caller, who composes the layout pass on top.

use graft_core::{Document, GraftError, NodeId, NodeKind, Rect, WindowChrome};

use crate::backend::{CodeBackend, ViewArtifact, ViewBackend};
use crate::code::{CodeArtifact, MemberDecl, Statement, Value};
use crate::context::{RenderContext, RenderOptions};
use crate::pipeline::{self, ProcessedNode};
use crate::registry::ConverterRegistry;
use crate::view::{ViewClass, ViewId, ViewTree, ViewValue};

/// Output of a view-backend run.
pub struct RenderedViews {
    pub tree: ViewTree,
    /// The main container, when the run generated one.
    pub main: Option<ViewId>,
    pub processed: Vec<ProcessedNode<ViewArtifact>>,
}

/// Live-object rendering service.
pub struct ViewRenderService<'a> {
    doc: &'a Document,
    registry: &'a ConverterRegistry,
}

impl<'a> ViewRenderService<'a> {
    pub fn new(doc: &'a Document, registry: &'a ConverterRegistry) -> Self {
        Self { doc, registry }
    }

    /// Run a full conversion from `root`. Each call is an isolated run
    /// with its own context and cache.
    pub fn render(&self, root: NodeId, options: RenderOptions) -> Result<RenderedViews, GraftError> {
        let mut ctx: RenderContext<ViewArtifact> = RenderContext::new(options);
        ctx.clear();

        let is_window = self.doc.is_dialog_container(root, None);
        let mut backend = if options.generate_main_view {
            let class = if is_window { ViewClass::WINDOW } else { ViewClass::VIEW };
            ViewBackend::with_main(class)
        } else {
            ViewBackend::new()
        };

        if let Some(main) = backend.main() {
            backend.tree.set_frame(main, main_frame(self.doc, root));
            if is_window {
                if let Some(chrome) = WindowChrome::resolve(self.doc, root) {
                    if let Some(title) = chrome.title {
                        backend.tree.set_property(main, "title", ViewValue::Str(title));
                    }
                    backend.tree.set_property(
                        main,
                        "closeButtonHidden",
                        ViewValue::Bool(chrome.close_button_hidden),
                    );
                    backend.tree.set_property(
                        main,
                        "minButtonHidden",
                        ViewValue::Bool(chrome.min_button_hidden),
                    );
                    backend.tree.set_property(
                        main,
                        "maxButtonHidden",
                        ViewValue::Bool(chrome.max_button_hidden),
                    );
                }
            }
        }

        let processed = pipeline::render(self.doc, self.registry, &mut backend, &mut ctx, root)?;
        Ok(RenderedViews { main: backend.main(), tree: backend.tree, processed })
    }
}

/// Output of a code-backend run: ordered statements plus the private
/// member declarations for views that were not inline-constructed. Handed
/// to an external code-file writer.
pub struct GeneratedCode {
    pub statements: Vec<Statement>,
    pub private_members: Vec<MemberDecl>,
    pub processed: Vec<ProcessedNode<CodeArtifact>>,
    pub main_binding: String,
}

impl GeneratedCode {
    /// Render the statement list to source text, one line per statement.
    pub fn source(&self) -> String {
        crate::code::render_statements(&self.statements)
    }
}

/// Source-text rendering service.
pub struct CodeRenderService<'a> {
    doc: &'a Document,
    registry: &'a ConverterRegistry,
}

impl<'a> CodeRenderService<'a> {
    pub fn new(doc: &'a Document, registry: &'a ConverterRegistry) -> Self {
        Self { doc, registry }
    }

    /// Generate statements for the subtree at `root`. Each call is an
    /// isolated run with its own context and cache.
    pub fn generate(&self, root: NodeId, options: RenderOptions) -> Result<GeneratedCode, GraftError> {
        let mut ctx: RenderContext<CodeArtifact> = RenderContext::new(options);
        ctx.clear();

        let mut backend = CodeBackend::new();
        let main_binding = backend.main_binding().to_string();

        if options.generate_main_view {
            // Generated names must never collide with the main binding.
            ctx.names.claim(&main_binding);
            backend.statements.push(Statement::SetFrame {
                target: main_binding.clone(),
                frame: main_frame(self.doc, root),
                alignment_rect: false,
            });
            if self.doc.is_dialog_container(root, None) {
                if let Some(chrome) = WindowChrome::resolve(self.doc, root) {
                    if let Some(title) = chrome.title {
                        backend.statements.push(Statement::Assign {
                            target: main_binding.clone(),
                            property: "title".into(),
                            value: Value::Str(title),
                        });
                    }
                    for (property, hidden) in [
                        ("closeButtonHidden", chrome.close_button_hidden),
                        ("minButtonHidden", chrome.min_button_hidden),
                        ("maxButtonHidden", chrome.max_button_hidden),
                    ] {
                        if hidden {
                            backend.statements.push(Statement::Assign {
                                target: main_binding.clone(),
                                property: property.into(),
                                value: Value::Bool(true),
                            });
                        }
                    }
                }
            }
        }

        let processed = pipeline::render(self.doc, self.registry, &mut backend, &mut ctx, root)?;
        Ok(GeneratedCode {
            statements: backend.statements,
            private_members: std::mem::take(&mut ctx.private_members),
            processed,
            main_binding,
        })
    }
}

/// Size of the main container: a canvas root takes its first visible
/// frame (the root content), anything else its own frame.
fn main_frame(doc: &Document, root: NodeId) -> Rect {
    let design = doc.node(root);
    let size = if design.kind == NodeKind::Canvas {
        doc.arena
            .first_visible_child(root, |node| node.kind == NodeKind::Frame)
            .map(|content| doc.node(content).frame)
            .unwrap_or(design.frame)
            .size()
    } else {
        design.frame.size()
    };
    Rect::new(0.0, 0.0, size.width, size.height)
}
