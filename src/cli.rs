use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bryc - Brython AOT compiler and synchronization tool
#[derive(Parser, Debug)]
#[command(name = "bryc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every source file once, then exit
    Sync {
        /// Source tree root
        #[arg(short, long)]
        source: PathBuf,

        /// Artifact tree root
        #[arg(short, long)]
        dest: PathBuf,

        /// Transpiler command (overrides bryc.toml)
        #[arg(long)]
        transpiler: Option<String>,
    },

    /// Convert everything, then watch for changes and sync continuously
    Watch {
        /// Source tree root
        #[arg(short, long)]
        source: PathBuf,

        /// Artifact tree root
        #[arg(short, long)]
        dest: PathBuf,

        /// Transpiler command (overrides bryc.toml)
        #[arg(long)]
        transpiler: Option<String>,
    },

    /// Show version information
    Version,
}
