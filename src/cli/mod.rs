pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tidings")]
#[command(about = "Once-a-day announcement feed checker", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/tidings/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite file holding the consent and last-check options
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the once-per-session check
    Run,
    /// Opt in to automatic checks and check right away
    Accept,
    /// Opt out of automatic checks
    Decline,
    /// Activate a link from the subscription proposal
    Respond {
        /// e.g. tidings://yes, tidings://no or a web URL
        link: String,
    },
    /// Show the stored options
    Status,
}
