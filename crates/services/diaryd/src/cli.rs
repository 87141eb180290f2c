//! Command-line interface for the Diary Service.

use clap::Parser;

/// Command-line interface for the Diary Service.
#[derive(Parser, Debug, Default)]
#[command(name = "diaryd")]
#[command(about = "Diary - personal diary REST backend")]
pub struct Cli {
    /// Address to listen on (can also be set via DIARY_ADDR environment variable)
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Run on the volatile in-memory store even if DATABASE_URL is set
    #[arg(long)]
    pub in_memory: bool,
}
