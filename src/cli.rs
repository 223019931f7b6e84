use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filestat")]
#[command(about = "Track how source files grow and shrink between observations")]
#[command(version)]
pub struct Cli {
    /// Snapshot database to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Show debug logging and detailed diagnostics
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Measure files, compare against their last snapshot and record the result
    Record(RecordArgs),

    /// List every recorded snapshot of one file
    History(FileArgs),

    /// Show the latest snapshot of one file
    Summary(FileArgs),

    /// List tracked projects and their files
    Projects,
}

#[derive(Parser)]
pub struct RecordArgs {
    /// Project the files belong to
    #[arg(long, short = 'p')]
    pub project: String,

    /// Files or directories to measure
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Project root that file identifiers are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Only record files with these extensions when walking directories
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Output as JSON instead of table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct FileArgs {
    /// Project the file belongs to
    #[arg(long, short = 'p')]
    pub project: String,

    /// File identifier as recorded
    #[arg(long, short = 'f')]
    pub file: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
