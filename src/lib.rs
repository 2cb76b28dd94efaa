//! Maximum-sum BST subtree search over level-order encoded binary trees.
//!
//! A binary tree is read as a level-order sequence with a sentinel marking
//! missing children, built into an arena, and evaluated in a single
//! post-order pass. The answer is the largest node-value sum over all
//! subtrees that satisfy the strict binary-search-tree property.
//!
//! ```
//! use bstsum::domain::{max_bst_sum, TreeBuilder};
//!
//! let tree = TreeBuilder::default().build(&[2, 1, 3]).unwrap();
//! assert_eq!(max_bst_sum(&tree), Some(6));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
