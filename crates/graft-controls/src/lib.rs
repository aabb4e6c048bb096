//! Bundled conversion strategies for native controls.
//!
//! Each strategy consults a node's control classification and the
//! structural sub-element conventions (state groups, TITLE text runs)
//! and produces both backends' output. [`default_converters`] registers
//! them in priority order: most specific first, the generic frame
//! fallback last.

pub mod helpers;

mod button;
mod combo_box;
mod frame;
mod label;
mod separator;
mod window;

pub use button::ButtonConverter;
pub use combo_box::ComboBoxConverter;
pub use frame::FrameConverter;
pub use label::LabelConverter;
pub use separator::SeparatorConverter;
pub use window::render_embedded_window;

use graft_convert::ConverterRegistry;

/// Registry with the bundled strategies in their canonical order.
pub fn default_converters() -> ConverterRegistry {
    let mut registry = ConverterRegistry::new();
    registry.register(SeparatorConverter);
    registry.register(ButtonConverter);
    registry.register(ComboBoxConverter);
    registry.register(LabelConverter);
    registry.register(FrameConverter);
    registry
}
