//! The Graft conversion engine.
//!
//! One traversal policy, two outputs: a design node tree is walked once
//! and, per node, a single strategy from the [`ConverterRegistry`]
//! produces either a live view object or a run of source statements. The
//! walk handles the structural rules that differ from plain recursion:
//! component instances share a definition, dialog/window containers emit
//! only their logical content, unconverted nodes flatten transparently
//! into their parent, and a processed-node cache keeps nodes reachable
//! through more than one path from emitting twice.
//!
//! # Example
//!
//! ```ignore
//! use graft_convert::{CodeRenderService, ConverterRegistry, RenderOptions};
//!
//! let registry = ConverterRegistry::new();
//! let service = CodeRenderService::new(&doc, &registry);
//! let generated = service.generate(doc.root, RenderOptions::default())?;
//! println!("{}", generated.source());
//! ```

pub mod backend;
pub mod code;
pub mod context;
pub mod converter;
pub mod pipeline;
pub mod registry;
pub mod service;
pub mod view;

pub use backend::{CodeBackend, ViewArtifact, ViewBackend};
pub use code::{custom_name, render_statements, Anchor, AnchorRef, CodeArtifact, MemberDecl, Statement, Value};
pub use context::{NameTable, ProcessedCache, RenderContext, RenderOptions};
pub use converter::{CodeProduction, NodeConverter, ViewProduction};
pub use pipeline::{render, Backend, ProcessedNode};
pub use registry::ConverterRegistry;
pub use service::{CodeRenderService, GeneratedCode, RenderedViews, ViewRenderService};
pub use view::{ViewClass, ViewId, ViewNode, ViewTree, ViewValue};
