use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "srclink", about = "Forge permalinks for file selections, branch names for issues", version)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress human-readable output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Start repository discovery here instead of the current directory
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); SRCLINK_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find where a selection sits in a file
    Locate {
        /// File to search
        file: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// 1-based line to start searching from
        #[arg(long)]
        line: Option<usize>,
    },

    /// Build a forge permalink for a file, selection or line range
    Url(UrlArgs),

    /// Derive a branch name from an issue
    Branch {
        /// Issue key, e.g. PROJ-123
        #[arg(long)]
        key: String,

        /// Issue title
        #[arg(long)]
        title: String,

        /// Create the branch at HEAD
        #[arg(long)]
        create: bool,

        /// Create the branch and switch to it
        #[arg(long)]
        checkout: bool,
    },

    /// Repository configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Clone, Args)]
pub struct SelectionArgs {
    /// Selected text to locate
    #[arg(long, conflicts_with = "selection_file")]
    pub selection: Option<String>,

    /// Read the selection from a file ("-" for stdin)
    #[arg(long)]
    pub selection_file: Option<PathBuf>,
}

#[derive(Clone, Args)]
pub struct UrlArgs {
    /// File to link to
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// First line of the range, or the search hint when a selection is given
    #[arg(long)]
    pub line: Option<usize>,

    /// Last line of the range
    #[arg(long, requires = "line", conflicts_with_all = ["selection", "selection_file"])]
    pub end_line: Option<usize>,

    /// Remote to link against (default: config, then origin)
    #[arg(long)]
    pub remote: Option<String>,

    /// Link to the current branch instead of the HEAD commit
    #[arg(long)]
    pub branch: bool,

    /// Open the link in a browser
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Set a configuration value
    Set {
        /// remote, link_ref, branch.prefix, branch.max_len or forges.<host>
        key: String,

        value: String,
    },
}
