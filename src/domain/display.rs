/*
Text rendering of binary trees via termtree.

termtree has no notion of left/right, so a missing child next to a present
sibling is rendered as a placeholder to keep the sides distinguishable.

Rendered text grows with the square of the depth and termtree nodes drop
recursively, so trees deeper than MAX_RENDER_DEPTH are refused.
 */
use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::TreeArena;
use crate::domain::builder::TreeResult;
use crate::domain::error::DomainError;
use crate::domain::evaluator::Evaluation;

pub const MISSING_CHILD: &str = "∅";

/// Deepest tree that can be rendered.
pub const MAX_RENDER_DEPTH: usize = 1_000;

pub trait TreeDisplay {
    /// Plain rendering, node values only.
    fn to_tree_string(&self) -> TreeResult<Tree<String>>;

    /// Rendering with BST validity and sums from an evaluation.
    fn to_annotated_tree(&self, evaluation: &Evaluation) -> TreeResult<Tree<String>>;
}

impl TreeDisplay for TreeArena {
    fn to_tree_string(&self) -> TreeResult<Tree<String>> {
        render(self, &|_, value| value.to_string())
    }

    fn to_annotated_tree(&self, evaluation: &Evaluation) -> TreeResult<Tree<String>> {
        let best_root = evaluation.best().map(|b| b.root);
        render(self, &|idx, value| {
            let mut label = value.to_string();
            if let Some(summary) = evaluation.summary(idx).filter(|s| s.is_bst) {
                label.push_str(&format!(" [bst sum={}]", summary.sum));
            }
            if best_root == Some(idx) {
                label.push_str(" *");
            }
            label
        })
    }
}

fn render(tree: &TreeArena, label: &dyn Fn(Index, i32) -> String) -> TreeResult<Tree<String>> {
    fn build(tree: &TreeArena, idx: Index, label: &dyn Fn(Index, i32) -> String) -> Tree<String> {
        let Some(node) = tree.get_node(idx) else {
            return Tree::new(MISSING_CHILD.to_string());
        };
        let mut subtree = Tree::new(label(idx, node.value));
        if node.is_leaf() {
            return subtree;
        }
        for child in [node.left, node.right] {
            match child {
                Some(child) => subtree.push(build(tree, child, label)),
                None => subtree.push(Tree::new(MISSING_CHILD.to_string())),
            };
        }
        subtree
    }

    let depth = tree.depth();
    if depth > MAX_RENDER_DEPTH {
        return Err(DomainError::TooDeepToRender {
            depth,
            limit: MAX_RENDER_DEPTH,
        });
    }

    Ok(match tree.root() {
        Some(root) => build(tree, root, label),
        None => Tree::new("Empty tree".to_string()),
    })
}
