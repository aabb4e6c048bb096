//! Core node model for the Graft conversion engine.
//!
//! A design document is loaded into an id-indexed [`NodeArena`]: children
//! hold arena indices and parent links are reverse lookups maintained by
//! the arena, so upward queries are O(1) without ownership cycles. A
//! [`Document`] bundles the arena with the [`ComponentLibrary`] that
//! instance nodes reference, and exposes the structural queries the
//! traversal pipeline relies on (dialog containers, window content,
//! visible-child matching).

pub mod component;
pub mod control;
pub mod document;
pub mod error;
pub mod geometry;
pub mod node;
pub mod raw;

pub use component::{ComponentDefinition, ComponentLibrary};
pub use control::{ControlClass, ControlType, ControlVariant};
pub use document::{Document, WindowChrome};
pub use error::{ConvertError, DocumentError, GraftError};
pub use geometry::{HorizontalPin, Pinning, Point, Rect, Size, VerticalPin};
pub use node::{DesignNode, NodeArena, NodeId, NodeKind, TextAlign};
pub use raw::{RawDocument, RawNode};
