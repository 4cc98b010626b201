// statgate/src/commands/validate.rs
//
// USE CASE: Quality report of a CSV file. Never writes anything.

use anyhow::Context;
use serde_json::json;
use std::path::PathBuf;

use statgate_core::application::assess;
use statgate_core::infrastructure::adapters::CsvSource;

use crate::cli::OutputFormat;
use crate::commands::{load_config, print_summary};

pub fn execute(file: PathBuf, project_dir: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let policy = config.approval_policy();

    let assessment = assess(&CsvSource, &config.validator(), &file)
        .with_context(|| format!("Failed to load dataset {}", file.display()))?;
    let report = &assessment.report;

    match format {
        OutputFormat::Json => {
            let output = json!({
                "report": report,
                "threshold": policy.threshold(),
                "eligible": policy.is_eligible(report),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("🧪 Validating {}...", file.display());
            print_summary(report, &policy);
        }
    }

    Ok(())
}
