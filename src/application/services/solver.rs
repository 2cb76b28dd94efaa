//! Max-sum BST solving service
//!
//! Reads a level-order tree description, builds the tree and evaluates it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::input::{parse_values, InputFormat};
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{evaluate, BestSubtree, TreeArena, TreeBuilder, TreeDisplay};
use crate::infrastructure::traits::{FileSystem, StdinReader};

/// Where the tree description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` both mean stdin.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => InputSource::File(path.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Per-run knobs, taken from settings and possibly overridden on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub sentinel: i32,
    pub format: InputFormat,
    /// Printed when the tree has no nodes at all
    pub empty_tree_answer: i64,
}

impl From<&Settings> for SolverOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            sentinel: settings.sentinel,
            format: settings.input_format,
            empty_tree_answer: settings.empty_tree_answer,
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Outcome of solving one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Best BST subtree sum, or the configured empty-tree answer
    pub answer: i64,
    /// None only for the empty tree
    pub best: Option<BestSubtree>,
    pub node_count: usize,
    pub depth: usize,
    /// Number of subtrees that are valid BSTs
    pub bst_count: usize,
}

/// Service for solving max-sum BST problems.
pub struct SolverService {
    fs: Arc<dyn FileSystem>,
    stdin: Arc<dyn StdinReader>,
}

impl SolverService {
    /// Create a new solver service.
    pub fn new(fs: Arc<dyn FileSystem>, stdin: Arc<dyn StdinReader>) -> Self {
        Self { fs, stdin }
    }

    /// Read the raw tree description.
    #[instrument(level = "debug", skip(self))]
    pub fn read_input(&self, source: &InputSource) -> ApplicationResult<String> {
        match source {
            InputSource::Stdin => self.stdin.read_all().with_context("read stdin"),
            InputSource::File(path) => self
                .fs
                .read_to_string(path)
                .with_path_context("read input", path),
        }
    }

    /// Parse `text` and build the tree it describes.
    #[instrument(level = "debug", skip(self, text))]
    pub fn build_tree(&self, text: &str, options: &SolverOptions) -> ApplicationResult<TreeArena> {
        let values = parse_values(text, options.format)?;
        debug!("build_tree: parsed {} values", values.len());
        let tree = TreeBuilder::new(options.sentinel).build(&values)?;
        Ok(tree)
    }

    /// Solve the tree described by `text`.
    #[instrument(level = "debug", skip(self, text))]
    pub fn solve_str(&self, text: &str, options: &SolverOptions) -> ApplicationResult<Solution> {
        let tree = self.build_tree(text, options)?;
        let evaluation = evaluate(&tree);
        let best = evaluation.best().copied();

        let solution = Solution {
            answer: best.map_or(options.empty_tree_answer, |b| b.sum),
            best,
            node_count: tree.len(),
            depth: tree.depth(),
            bst_count: evaluation.bst_count(),
        };
        info!(
            answer = solution.answer,
            nodes = solution.node_count,
            "solved"
        );
        Ok(solution)
    }

    /// Read and solve.
    pub fn solve(&self, source: &InputSource, options: &SolverOptions) -> ApplicationResult<Solution> {
        debug!("solve: source={}", source);
        let text = self.read_input(source)?;
        self.solve_str(&text, options)
    }

    /// Render the tree described by `source`, optionally annotated with BST sums.
    #[instrument(level = "debug", skip(self))]
    pub fn render(
        &self,
        source: &InputSource,
        options: &SolverOptions,
        annotate: bool,
    ) -> ApplicationResult<String> {
        let text = self.read_input(source)?;
        let tree = self.build_tree(&text, options)?;
        let rendered = if annotate {
            tree.to_annotated_tree(&evaluate(&tree))?
        } else {
            tree.to_tree_string()?
        };
        Ok(rendered.to_string())
    }
}
