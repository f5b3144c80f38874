use std::path::PathBuf;

use clap::Parser;

/// Replay a guest/embedder scenario against the in-memory host and print
/// every message delivered to an embedder as one JSON line.
#[derive(Parser, Debug)]
#[command(name = "guestview-sim", version, about)]
pub struct Args {
    /// Scenario file (JSON array of steps).
    pub scenario: PathBuf,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
