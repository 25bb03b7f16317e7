//! Pomsweep CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pomsweep")]
#[command(about = "Reports which artifacts in a local Maven repository are safe to delete", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Repository root path (defaults to ~/.m2/repository)
    #[arg(short, long)]
    repo: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the repository and print the dependency graph summary
    Scan,
    /// Show distances, dependants and dependencies of matching artifacts
    Inspect {
        /// Substring matched against group:artifact:version coordinates
        pattern: String,
    },
    /// Compute cleanup candidates: what the removal set needs minus what the
    /// keep set needs
    Plan {
        /// Substring selecting the artifacts to remove
        #[arg(long)]
        remove: String,

        /// Substring selecting the artifacts that must keep working
        #[arg(long)]
        keep: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: commands::OutputFormat,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "pomsweep={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let repo = match cli.repo {
        Some(repo) => repo,
        None => default_repository()?,
    };
    tracing::info!("Pomsweep v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Repository root: {}", repo.display());

    match cli.command {
        Commands::Scan => commands::scan(&repo),
        Commands::Inspect { pattern } => commands::inspect(&repo, &pattern),
        Commands::Plan {
            remove,
            keep,
            format,
        } => commands::plan(&repo, &remove, keep.as_deref(), format),
        Commands::Version => {
            println!("Pomsweep v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn default_repository() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("cannot locate a home directory; pass --repo"))?;
    Ok(home.join(".m2").join("repository"))
}
