//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use crate::application::InputFormat;

/// Maximum sum over all binary-search-tree subtrees of a level-order encoded binary tree
#[derive(Parser, Debug)]
#[command(name = "bstsum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Additional config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the maximum BST subtree sum (default command, reads stdin)
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Also report the best subtree's root, its size and tree statistics
        #[arg(short, long)]
        explain: bool,
    },

    /// Render the tree
    Tree {
        #[command(flatten)]
        input: InputArgs,

        /// Mark valid BST subtrees with their sums and flag the best one
        #[arg(short, long)]
        annotate: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where and how to read the tree description.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Input file; stdin when omitted or `-`
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Value marking a missing child (overrides config)
    #[arg(short, long, allow_negative_numbers = true)]
    pub sentinel: Option<i32>,

    /// Input layout (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template (global location unless --config is given)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
