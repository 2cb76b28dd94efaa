//! Maximum-sum BST subtree evaluation.
//!
//! One post-order pass computes, for every subtree, its value range, whether
//! it satisfies the BST property, its sum and its size. The best sum among
//! valid BST subtrees is folded along the way.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;

/// Smallest and largest value in a non-empty subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

/// Derived facts about one subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtreeSummary {
    /// None for the empty subtree
    pub range: Option<ValueRange>,
    pub is_bst: bool,
    pub sum: i64,
    pub size: usize,
}

impl SubtreeSummary {
    /// Summary of an absent child: a valid BST with nothing in it.
    pub const EMPTY: SubtreeSummary = SubtreeSummary {
        range: None,
        is_bst: true,
        sum: 0,
        size: 0,
    };
}

/// Combine a node value with the summaries of its two subtrees.
///
/// Comparisons are strict, so a duplicate anywhere below invalidates the node.
pub fn summarize(value: i32, left: &SubtreeSummary, right: &SubtreeSummary) -> SubtreeSummary {
    let left_ok = left.range.map_or(true, |r| r.max < value);
    let right_ok = right.range.map_or(true, |r| r.min > value);

    let range = [left.range, right.range]
        .into_iter()
        .flatten()
        .fold(ValueRange { min: value, max: value }, |acc, r| ValueRange {
            min: acc.min.min(r.min),
            max: acc.max.max(r.max),
        });

    SubtreeSummary {
        range: Some(range),
        is_bst: left.is_bst && right.is_bst && left_ok && right_ok,
        sum: left.sum + right.sum + i64::from(value),
        size: left.size + right.size + 1,
    }
}

/// The valid BST subtree with the largest sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestSubtree {
    pub root: Index,
    /// Value of the subtree's root node
    pub value: i32,
    pub sum: i64,
    pub size: usize,
}

/// Result of a full evaluation.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    summaries: HashMap<Index, SubtreeSummary>,
    best: Option<BestSubtree>,
}

impl Evaluation {
    /// None only for the empty tree.
    pub fn best(&self) -> Option<&BestSubtree> {
        self.best.as_ref()
    }

    pub fn best_sum(&self) -> Option<i64> {
        self.best.map(|b| b.sum)
    }

    pub fn summary(&self, idx: Index) -> Option<&SubtreeSummary> {
        self.summaries.get(&idx)
    }

    /// Number of subtrees that are valid BSTs.
    pub fn bst_count(&self) -> usize {
        self.summaries.values().filter(|s| s.is_bst).count()
    }

    fn child_summary(&self, child: Option<Index>) -> SubtreeSummary {
        child
            .and_then(|idx| self.summaries.get(&idx).copied())
            .unwrap_or(SubtreeSummary::EMPTY)
    }

    fn record(&mut self, idx: Index, value: i32, summary: SubtreeSummary) {
        if summary.is_bst && self.best.map_or(true, |b| summary.sum > b.sum) {
            trace!(value, sum = summary.sum, "new best BST subtree");
            self.best = Some(BestSubtree {
                root: idx,
                value,
                sum: summary.sum,
                size: summary.size,
            });
        }
        self.summaries.insert(idx, summary);
    }
}

/// Evaluate every subtree of `tree`.
///
/// Uses the arena's post-order iterator, so children are always summarized
/// before their parent and the traversal needs no call-stack recursion.
#[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
pub fn evaluate(tree: &TreeArena) -> Evaluation {
    let mut evaluation = Evaluation {
        summaries: HashMap::with_capacity(tree.len()),
        best: None,
    };

    for (idx, node) in tree.iter_postorder() {
        let left = evaluation.child_summary(node.left);
        let right = evaluation.child_summary(node.right);
        let summary = summarize(node.value, &left, &right);
        evaluation.record(idx, node.value, summary);
    }

    debug!(best = ?evaluation.best_sum(), "evaluation complete");
    evaluation
}

/// Maximum sum over all valid BST subtrees, None for the empty tree.
pub fn max_bst_sum(tree: &TreeArena) -> Option<i64> {
    evaluate(tree).best_sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arena::Side;

    fn leaf(value: i32) -> SubtreeSummary {
        summarize(value, &SubtreeSummary::EMPTY, &SubtreeSummary::EMPTY)
    }

    #[test]
    fn given_no_children_when_summarizing_then_node_is_a_bst() {
        let s = leaf(-7);
        assert!(s.is_bst);
        assert_eq!(s.sum, -7);
        assert_eq!(s.size, 1);
        assert_eq!(s.range, Some(ValueRange { min: -7, max: -7 }));
    }

    #[test]
    fn given_ordered_children_when_summarizing_then_combines_range_and_sum() {
        let s = summarize(5, &leaf(3), &leaf(8));
        assert!(s.is_bst);
        assert_eq!(s.sum, 16);
        assert_eq!(s.size, 3);
        assert_eq!(s.range, Some(ValueRange { min: 3, max: 8 }));
    }

    #[test]
    fn given_equal_left_child_when_summarizing_then_not_a_bst() {
        let s = summarize(5, &leaf(5), &SubtreeSummary::EMPTY);
        assert!(!s.is_bst);
        assert_eq!(s.sum, 10);
    }

    #[test]
    fn given_invalid_child_when_summarizing_then_parent_is_invalid() {
        let broken = summarize(2, &leaf(3), &SubtreeSummary::EMPTY);
        let s = summarize(10, &broken, &SubtreeSummary::EMPTY);
        assert!(!s.is_bst);
        // range is still tracked for invalid subtrees
        assert_eq!(s.range, Some(ValueRange { min: 2, max: 10 }));
    }

    #[test]
    fn given_extreme_values_when_summarizing_then_no_overflow_or_false_bounds() {
        let s = summarize(0, &leaf(i32::MIN), &leaf(i32::MAX));
        assert!(s.is_bst);
        assert_eq!(s.sum, i64::from(i32::MIN) + i64::from(i32::MAX));
    }

    #[test]
    fn given_empty_tree_when_evaluating_then_no_best() {
        let evaluation = evaluate(&TreeArena::new());
        assert!(evaluation.best().is_none());
        assert_eq!(evaluation.bst_count(), 0);
    }

    #[test]
    fn given_tie_when_evaluating_then_keeps_first_in_postorder() {
        //   0
        //  / \
        // 4   4   (root invalid: right child not greater)
        let mut tree = TreeArena::new();
        let root = tree.insert_root(0).unwrap();
        let left = tree.insert_child(root, Side::Left, 4).unwrap();
        tree.insert_child(root, Side::Right, 4).unwrap();

        let evaluation = evaluate(&tree);

        let best = evaluation.best().unwrap();
        assert_eq!(best.sum, 4);
        assert_eq!(best.root, left);
        assert_eq!(evaluation.bst_count(), 2);
    }
}
