//! Arena-backed binary tree.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Node value
    pub value: i32,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Left child, owned exclusively by this node
    pub left: Option<Index>,
    /// Right child, owned exclusively by this node
    pub right: Option<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Arena-based binary tree.
///
/// Nodes are only ever added, never removed, so every index handed out stays
/// valid for the lifetime of the tree. An arena without a root is the empty
/// tree.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            root: None,
        }
    }

    /// Insert the root node, replacing nothing: a tree has exactly one root.
    ///
    /// Returns None if a root already exists.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_root(&mut self, value: i32) -> Option<Index> {
        if self.root.is_some() {
            return None;
        }
        let idx = self.arena.insert(TreeNode {
            value,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(idx);
        Some(idx)
    }

    /// Attach a new node below `parent` on the given side.
    ///
    /// Returns None if the parent does not exist or the slot is taken, so a
    /// child can never be shared or overwritten.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: Index, side: Side, value: i32) -> Option<Index> {
        match self.arena.get(parent) {
            Some(node) if node.child(side).is_none() => {}
            _ => return None,
        }
        let idx = self.arena.insert(TreeNode {
            value,
            parent: Some(parent),
            left: None,
            right: None,
        });
        if let Some(node) = self.arena.get_mut(parent) {
            match side {
                Side::Left => node.left = Some(idx),
                Side::Right => node.right = Some(idx),
            }
        }
        Some(idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Preorder iterator (node, left subtree, right subtree).
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Postorder iterator (left subtree, right subtree, node).
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for the empty tree.
    ///
    /// Iterative so degenerate trees cannot overflow the call stack.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();

        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                max_depth = max_depth.max(depth);
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Right first so the left subtree is visited first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                if let Some(right) = node.right {
                    self.stack.push((right, false));
                }
                if let Some(left) = node.left {
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeArena {
        //     2
        //    / \
        //   1   3
        //        \
        //         4
        let mut tree = TreeArena::new();
        let root = tree.insert_root(2).unwrap();
        tree.insert_child(root, Side::Left, 1).unwrap();
        let three = tree.insert_child(root, Side::Right, 3).unwrap();
        tree.insert_child(three, Side::Right, 4).unwrap();
        tree
    }

    #[test]
    fn given_empty_tree_when_querying_then_has_no_nodes() {
        let tree = TreeArena::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.iter_postorder().count(), 0);
    }

    #[test]
    fn given_tree_when_iterating_preorder_then_visits_node_before_children() {
        let tree = sample();
        let values: Vec<i32> = tree.iter().map(|(_, n)| n.value).collect();
        assert_eq!(values, vec![2, 1, 3, 4]);
    }

    #[test]
    fn given_tree_when_iterating_postorder_then_visits_children_first() {
        let tree = sample();
        let values: Vec<i32> = tree.iter_postorder().map(|(_, n)| n.value).collect();
        assert_eq!(values, vec![1, 4, 3, 2]);
    }

    #[test]
    fn given_tree_when_measuring_then_reports_depth_and_leaves() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        let leaves: Vec<i32> = tree
            .iter()
            .filter(|(_, n)| n.is_leaf())
            .map(|(_, n)| n.value)
            .collect();
        assert_eq!(leaves, vec![1, 4]);
    }

    #[test]
    fn given_occupied_slot_when_inserting_child_then_refuses() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        assert!(tree.insert_child(root, Side::Left, 9).is_none());
        assert!(tree.insert_root(9).is_none());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_child_when_inspecting_then_links_back_to_parent() {
        let tree = sample();
        let root = tree.root().unwrap();
        let left = tree.get_node(root).unwrap().left.unwrap();
        assert_eq!(tree.get_node(left).unwrap().parent, Some(root));
    }
}
