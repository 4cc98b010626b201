// statgate/src/commands/mod.rs

pub mod publish;
pub mod releases;
pub mod validate;

use anyhow::Context;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::Path;

use statgate_core::domain::ValidationReport;
use statgate_core::domain::approval::ApprovalPolicy;
use statgate_core::infrastructure::config::{ProjectConfig, load_project_config};

pub(crate) fn load_config(project_dir: &Path) -> anyhow::Result<ProjectConfig> {
    load_project_config(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {}",
            project_dir.display()
        )
    })
}

/// Rule-by-rule breakdown, in evaluation order.
pub(crate) fn rules_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Rule", "Status", "Affected"]);
    for rule in &report.rules {
        let status = if rule.satisfied { "✅ PASS" } else { "❌ FAIL" };
        let affected = rule
            .affected_count
            .map_or_else(|| "n/a".to_string(), |n| n.to_string());
        table.add_row(vec![rule.name.clone(), status.to_string(), affected]);
    }
    table
}

pub(crate) fn print_summary(report: &ValidationReport, policy: &ApprovalPolicy) {
    println!("📊 Records: {}", report.total_records);
    println!("   Estimated errors: {}", report.error_count);
    println!("   Quality score: {:.2}%", report.quality_score);
    println!("{}", rules_table(report));
    if policy.is_eligible(report) {
        println!(
            "✅ Eligible for publication (threshold {:.2}%)",
            policy.threshold()
        );
    } else {
        println!(
            "⛔ Not eligible for publication: {:.2} points below the {:.2}% threshold",
            policy.shortfall(report),
            policy.threshold()
        );
    }
}
