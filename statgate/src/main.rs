// statgate/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug statgate validate ... to see the details.
    // Logs go to stderr so `--format json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: QUALITY REPORT ---
        Commands::Validate {
            file,
            project_dir,
            format,
        } => commands::validate::execute(file, project_dir, format),

        // --- USE CASE: GATED PUBLICATION ---
        Commands::Publish {
            file,
            project_dir,
            approved_by,
            description,
        } => commands::publish::execute(file, project_dir, approved_by, description),

        // --- USE CASE: RELEASE MONITORING ---
        Commands::Releases { project_dir } => commands::releases::execute(project_dir),
    }
}
