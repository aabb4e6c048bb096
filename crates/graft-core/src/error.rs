//! Error types for the Graft engine.

use thiserror::Error;

use crate::node::NodeId;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum GraftError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Errors while loading a raw document into the arena.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("duplicate component key '{0}'")]
    DuplicateComponentKey(String),

    #[error("component definition '{0}' is missing a component key")]
    MissingComponentKey(String),
}

/// Errors during a conversion run. A run either completes with a full
/// artifact tree/statement list or fails atomically with the offending
/// node; partial output is never surfaced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An instance references a component definition that cannot be
    /// located. Downstream layout/attachment has no valid subtree to use,
    /// so this fails the run.
    #[error("node {node} references unresolved component '{component}'")]
    UnresolvedComponent { node: NodeId, component: String },
}
