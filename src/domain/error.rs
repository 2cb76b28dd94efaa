//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent a level-order sequence that does not describe a
/// tree, or a tree that cannot be shown.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("value {value} at position {position} has no parent slot left in the tree")]
    UnreachableValue { position: usize, value: i32 },

    /// Internal invariant: the builder only fills empty slots of nodes it created.
    #[error("tree construction failed at position {position}: {message}")]
    Construction { position: usize, message: String },

    #[error("tree depth {depth} exceeds the rendering limit of {limit}")]
    TooDeepToRender { depth: usize, limit: usize },
}
