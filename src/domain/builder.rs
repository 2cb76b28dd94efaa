//! Tree builder for level-order encoded binary trees.

use std::collections::VecDeque;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Side, TreeArena};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Default marker for "no child" in a level-order sequence.
pub const DEFAULT_SENTINEL: i32 = -1;

/// Constructs binary trees from level-order value sequences.
///
/// The first value is always the root. Every node that enters the tree then
/// claims the next two values as its left and right child, in breadth-first
/// order. A sentinel value leaves the slot empty.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    sentinel: i32,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

impl TreeBuilder {
    pub fn new(sentinel: i32) -> Self {
        Self { sentinel }
    }

    /// Build a tree from a level-order sequence.
    ///
    /// A missing trailing right child counts as absent. Values left over
    /// once every node has had its slots filled must all be sentinels.
    #[instrument(level = "debug", skip(self, values), fields(len = values.len(), sentinel = self.sentinel))]
    pub fn build(&self, values: &[i32]) -> TreeResult<TreeArena> {
        let mut tree = TreeArena::with_capacity(values.len());
        let Some((&first, rest)) = values.split_first() else {
            debug!("empty sequence, empty tree");
            return Ok(tree);
        };

        // The arena is fresh; a failure here is a builder bug, not bad input
        let root = tree.insert_root(first).ok_or_else(|| DomainError::Construction {
            position: 0,
            message: "fresh tree refused a root".to_string(),
        })?;

        let mut pending: VecDeque<Index> = VecDeque::from([root]);
        let mut slots = rest.iter().copied().enumerate().map(|(i, v)| (i + 1, v));

        while let Some((position, value)) = slots.next() {
            let Some(parent) = pending.pop_front() else {
                // Every node has its slots filled; only sentinel padding may follow
                let mut leftovers = std::iter::once((position, value)).chain(slots.by_ref());
                if let Some((position, value)) = leftovers.find(|&(_, v)| v != self.sentinel) {
                    return Err(DomainError::UnreachableValue { position, value });
                }
                break;
            };

            if let Some(idx) = self.attach(&mut tree, parent, Side::Left, position, value)? {
                pending.push_back(idx);
            }
            if let Some((position, value)) = slots.next() {
                if let Some(idx) = self.attach(&mut tree, parent, Side::Right, position, value)? {
                    pending.push_back(idx);
                }
            }
        }

        debug!(nodes = tree.len(), "tree built");
        Ok(tree)
    }

    fn attach(
        &self,
        tree: &mut TreeArena,
        parent: Index,
        side: Side,
        position: usize,
        value: i32,
    ) -> TreeResult<Option<Index>> {
        if value == self.sentinel {
            trace!(position, %side, "no child");
            return Ok(None);
        }
        // Each parent leaves the queue once, so its slots are still empty
        let idx = tree
            .insert_child(parent, side, value)
            .ok_or_else(|| DomainError::Construction {
                position,
                message: format!("{side} slot of parent unavailable"),
            })?;
        trace!(position, %side, value, "child attached");
        Ok(Some(idx))
    }
}
