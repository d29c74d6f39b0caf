//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod compare;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;

#[derive(Parser)]
#[command(name = "doccompare")]
#[command(about = "Compare two documents with a hosted language model")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ./doccompare.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind address: port, host, or host:port (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Compare two text files through a running server
    Compare {
        /// Original document
        original: PathBuf,
        /// Modified document
        modified: PathBuf,
        /// Server base URL
        #[arg(
            short,
            long,
            env = "DOCCOMPARE_SERVER",
            default_value = "http://127.0.0.1:3030"
        )]
        server: String,
        /// Print the raw comparison result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.server.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Compare {
            original,
            modified,
            server,
            json,
        } => compare::cmd_compare(&original, &modified, &server, json).await,
    }
}
