//! Live-preview rendering of window subtrees.
//!
//! An embedded window preview loads an auxiliary copy of the document
//! (the loading itself is the caller's asynchronous boundary) and runs a
//! nested, fully isolated conversion: fresh context, fresh cache, fresh
//! view tree. Nothing is shared with the outer run except the read-only
//! document and registry.

use graft_convert::{ConverterRegistry, RenderOptions, RenderedViews, ViewRenderService};
use graft_core::{Document, GraftError, NodeId};
use graft_layout::LayoutManager;

/// Render the dialog/window subtree at `container` from an auxiliary
/// document as a standalone window view tree, laid out with constraints.
pub fn render_embedded_window(
    doc: &Document,
    container: NodeId,
    registry: &ConverterRegistry,
) -> Result<RenderedViews, GraftError> {
    log::debug!("starting nested window render for {container}");
    let service = ViewRenderService::new(doc, registry);
    let mut rendered = service.render(container, RenderOptions::default())?;
    LayoutManager::new().run_views(doc, &mut rendered);
    Ok(rendered)
}
