//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Reconstruct the component hierarchy of a React app from its imports and JSX tags
#[derive(Parser, Debug)]
#[command(name = "reacttree")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Entry file of the app, e.g. src/index.js
    #[arg(value_hint = ValueHint::FilePath)]
    pub entry: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Indented)]
    pub format: OutputFormat,

    /// Directory import paths are resolved against (default: directory of the entry file)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Do not scan components deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Match tags against import lines as whole identifiers only
    #[arg(long)]
    pub word_boundary: bool,

    /// Scan each source file once and reuse its subtree
    #[arg(long)]
    pub memoize: bool,

    /// Project directory holding .reacttree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One label per line, two spaces per level
    #[default]
    Indented,
    /// Box-drawing tree with cut-off markers
    Tree,
    /// Nested JSON objects
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Init {
        /// Write the template to <project_dir>/.reacttree.toml
        #[arg(short, long)]
        write: bool,
    },

    /// Show config paths
    Path,
}
