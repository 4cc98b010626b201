// statgate/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "statgate")]
#[command(about = "Quality gate and versioned publisher for statistical microdata", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧪 Runs the quality rules on a CSV file and prints the report
    Validate {
        /// CSV file with a header row
        file: PathBuf,

        /// Project directory (where statgate.yaml lives)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Output format: table | json
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// 📦 Validates, applies the quality gate and publishes a new release
    Publish {
        /// CSV file with a header row
        file: PathBuf,

        /// Project directory (where statgate.yaml lives)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Person signing the release off (defaults to the project config)
        #[arg(long)]
        approved_by: Option<String>,

        /// Release description (defaults to the project config)
        #[arg(long)]
        description: Option<String>,
    },

    /// 📚 Lists published releases and flags the ones needing attention
    Releases {
        /// Project directory (where statgate.yaml lives)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
