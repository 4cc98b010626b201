// statgate/src/commands/publish.rs
//
// USE CASE: load -> validate -> gate -> publish, in one call.

use anyhow::Context;
use std::path::PathBuf;

use statgate_core::application::{Publisher, ReleaseOutcome, SignOff, assess, release};
use statgate_core::domain::publication::{BULLETIN_FILE, DATA_FILE, METADATA_FILE};
use statgate_core::infrastructure::adapters::CsvSource;

use crate::commands::{load_config, print_summary};

pub fn execute(
    file: PathBuf,
    project_dir: PathBuf,
    approved_by: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let policy = config.approval_policy();

    println!("🧪 Validating {}...", file.display());
    let assessment = assess(&CsvSource, &config.validator(), &file)
        .with_context(|| format!("Failed to load dataset {}", file.display()))?;
    print_summary(&assessment.report, &policy);

    let sign_off = SignOff {
        approved_by: approved_by.unwrap_or_else(|| config.approval.approved_by.clone()),
        description: description.unwrap_or_else(|| config.approval.description.clone()),
    };
    let publications_dir = config.publications_dir(&project_dir);
    let publisher = Publisher::new(&publications_dir)?;

    let outcome = release(assessment, &policy, &publisher, sign_off).with_context(|| {
        format!(
            "Publication failed under {}",
            publications_dir.display()
        )
    })?;

    match outcome {
        ReleaseOutcome::Rejected { report, threshold } => {
            eprintln!(
                "\n❌ Release rejected: quality {:.2}% is below the {:.2}% threshold. Nothing was published.",
                report.quality_score, threshold
            );
            // Exit with error code for CI/CD
            std::process::exit(1);
        }
        ReleaseOutcome::Published {
            metadata, location, ..
        } => {
            println!("\n📦 Published release {}", location.display());
            println!("   Approved by: {}", metadata.approved_by);
            for file in [DATA_FILE, METADATA_FILE, BULLETIN_FILE] {
                println!("   ➜ {}", location.join(file).display());
            }
            println!("✨ Release complete.");
        }
    }

    Ok(())
}
