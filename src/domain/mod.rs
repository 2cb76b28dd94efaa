//! Domain layer: the binary tree and the max-sum BST evaluation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod error;
pub mod evaluator;

pub use arena::{Side, TreeArena, TreeNode};
pub use builder::{TreeBuilder, TreeResult, DEFAULT_SENTINEL};
pub use display::{TreeDisplay, MAX_RENDER_DEPTH};
pub use error::DomainError;
pub use evaluator::{
    evaluate, max_bst_sum, summarize, BestSubtree, Evaluation, SubtreeSummary, ValueRange,
};
