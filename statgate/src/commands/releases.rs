// statgate/src/commands/releases.rs
//
// USE CASE: Monitoring view over the publications root.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use statgate_core::application::list_releases;

use crate::commands::load_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let policy = config.approval_policy();
    let root = config.publications_dir(&project_dir);

    let releases = list_releases(&root)?;
    if releases.is_empty() {
        println!("📭 No releases published yet in {}", root.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Version", "Records", "Quality", "Approved by", "Status"]);

    let mut alerts = 0;
    for summary in &releases {
        let alert = summary.is_alert(&policy);
        if alert {
            alerts += 1;
        }
        let status = if alert { "⚠️ ALERT" } else { "✅ OK" };
        let row = match &summary.metadata {
            Some(m) => vec![
                summary.version.to_string(),
                m.record_count.to_string(),
                format!("{:.2}%", m.quality_score),
                m.approved_by.clone(),
                status.to_string(),
            ],
            None => vec![
                summary.version.to_string(),
                "?".to_string(),
                "?".to_string(),
                "(metadata unreadable)".to_string(),
                status.to_string(),
            ],
        };
        table.add_row(row);
    }

    println!("📚 Releases in {}", root.display());
    println!("{table}");
    println!("📊 {} release(s), {} alert(s)", releases.len(), alerts);
    if alerts > 0 {
        println!(
            "   ⚠️  Alerts: quality below {:.2}% or unreadable metadata.",
            policy.threshold()
        );
    }

    Ok(())
}
