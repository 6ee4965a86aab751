//! Wordl CLI
//!
//! Runs and inspects the wordl admin backend.
//!
//! # Commands
//!
//! - `serve` - Run the admin HTTP API
//! - `inspect` - Count records per collection in a SQLite database
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Wordl admin backend.
#[derive(Parser)]
#[command(name = "wordl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the admin HTTP API
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// SQLite database file (records are kept in memory if omitted)
        #[arg(short, long)]
        db: Option<PathBuf>,

        /// Upper bound on each search index call, in milliseconds
        #[arg(long, default_value = "5000")]
        index_timeout_ms: u64,
    },

    /// Count records per collection in a SQLite database
    Inspect {
        /// SQLite database file
        #[arg(short, long)]
        db: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            bind,
            db,
            index_timeout_ms,
        } => {
            commands::serve::run(bind, db, index_timeout_ms).await?;
        }
        Commands::Inspect { db, format } => {
            commands::inspect::run(&db, &format).await?;
        }
        Commands::Version => {
            println!("Wordl CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Wordl Core v{}", wordl_core::VERSION);
        }
    }

    Ok(())
}
