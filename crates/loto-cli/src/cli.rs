use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "loto",
    about = "Loto draw ledger: record drawn numbers and check tickets",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a loto.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the durable history (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a drawn number
    Add(AddArgs),
    /// Record a number read from dictated text
    Say(SayArgs),
    /// Change the number at a draw position
    Edit(EditArgs),
    /// Delete the whole draw history
    Clear(ClearArgs),
    /// Show drawn numbers, most recent first
    History(HistoryArgs),
    /// Show the last drawn number
    Current(CurrentArgs),
    /// Check a five-number ticket against the history
    Verify(VerifyArgs),
    /// Write the history as CSV
    Export(ExportArgs),
    /// Show the resolved configuration
    Config,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(allow_hyphen_values = true)]
    pub number: String,
}

#[derive(Args)]
pub struct SayArgs {
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub words: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Draw position as shown by `history` (1 = first drawn)
    pub position: usize,
    #[arg(allow_hyphen_values = true)]
    pub number: String,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct HistoryArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct CurrentArgs {
    /// Display this number as current without changing the history
    #[arg(long, allow_hyphen_values = true)]
    pub set: Option<String>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Ticket numbers, comma-separated or as separate arguments
    #[arg(required = true, num_args = 1..)]
    pub ticket: Vec<String>,
}

impl VerifyArgs {
    /// All arguments folded into one comma-separated ticket string.
    pub fn ticket_input(&self) -> String {
        self.ticket.join(",")
    }
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print the CSV instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}
