use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "smartissues", version)]
#[clap(about = "AI-driven GitHub issues analysis tool", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
