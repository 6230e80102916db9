use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tranchesel - Score-guided selection of tranche collections for ultra-large virtual screens.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select collections covering a ligand target and write them as a todo list.
    Select(SelectArgs),
    /// Run the dimension-averaged filter search and report its patterns round by round.
    Pattern(PatternArgs),
}

/// Inputs and selection parameters shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Inputs ---
    /// Score table: per-class scores (dimension averaging) or a prescreen ranking (rank scan).
    #[arg(short, long, value_name = "PATH")]
    pub scores: Option<PathBuf>,

    /// Collection manifest with `Tranche`, `Collection` and `LigandCount` columns.
    #[arg(long, value_name = "PATH")]
    pub collections: Option<PathBuf>,

    /// Optional tranche manifest with `Tranche` and `LigandCount` columns.
    #[arg(long, value_name = "PATH")]
    pub tranches: Option<PathBuf>,

    // --- Selection ---
    /// Scoring mode: 'dimension_averaging', 'tranche_min_score' or 'tranche_ave_score'.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Number of ligands to select. Accepts K, M and B suffixes (e.g., '250M').
    #[arg(short, long, value_name = "COUNT")]
    pub target: Option<String>,

    /// Regular expression a tranche must fully match to be eligible (rank-scan modes).
    #[arg(short, long, value_name = "REGEX")]
    pub eligibility: Option<String>,

    /// Match the eligibility pattern against collection keys instead of tranche codes.
    #[arg(long)]
    pub match_collection_key: bool,

    /// What to do when the seed filter alone exceeds the target: 'trim' or 'keep'.
    #[arg(long, value_name = "POLICY")]
    pub seed_overflow: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S selection.target=5M
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `select` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Path for the todo list of selected collections.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `pattern` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}
