//! promptree CLI — the main entry point.
//!
//! Commands:
//! - `init`      — Write a default config file
//! - `watch`     — Watch a conversation tree and process changed nodes
//! - `process`   — Process a single node once
//! - `new`       — Create a child node under a parent
//! - `summarize` — Summarize the conversation up to a node
//! - `status`    — Show configuration and provider health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "promptree",
    about = "promptree — filesystem-resident branching LLM conversations",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,

    /// Watch a conversation tree and process nodes as request files change
    Watch {
        /// Tree root to watch (defaults to the configured path)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Override the model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Process a single node once
    Process {
        /// The node directory
        node: PathBuf,

        /// Tree root (defaults to the configured path)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Override the model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Create a child node under a parent directory
    New {
        /// The parent node directory
        parent: PathBuf,

        /// Short description of the branch, used in the directory name
        descriptor: String,
    },

    /// Summarize the conversation up to a node
    Summarize {
        /// The node directory
        node: PathBuf,

        /// Tree root (defaults to the configured path)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show configuration and provider health
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run()?,
        Commands::Watch { path, model } => commands::watch::run(path, model).await?,
        Commands::Process { node, path, model } => {
            commands::process::run(node, path, model).await?
        }
        Commands::New { parent, descriptor } => commands::new_node::run(parent, &descriptor)?,
        Commands::Summarize { node, path } => commands::summarize::run(node, path).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
