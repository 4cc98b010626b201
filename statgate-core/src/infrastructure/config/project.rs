// statgate-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["statgate.yaml", "statgate_project_conf.yaml"];

pub const ENV_PUBLICATIONS_PATH: &str = "STATGATE_PUBLICATIONS_PATH";
pub const ENV_QUALITY_THRESHOLD: &str = "STATGATE_QUALITY_THRESHOLD";

// --- LOADER ---

/// Loads the project configuration: file (optional) -> environment overrides -> validation.
/// Without a configuration file the built-in defaults apply.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    load_project_config_with(project_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_project_config`] with an explicit environment lookup.
pub fn load_project_config_with<F>(
    project_dir: &Path,
    env: F,
) -> Result<ProjectConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading project configuration");
            let content = fs::read_to_string(&config_path)?;
            parse_config(&content)?
        }
        None => {
            info!(dir = ?project_dir, "No configuration file, using defaults");
            ProjectConfig::default()
        }
    };

    // Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: STATGATE_QUALITY_THRESHOLD=90 statgate publish ...
    apply_env_overrides(&mut config, env)?;

    // NaN slips through the range check (every comparison is false).
    if !config.quality_threshold.is_finite() {
        return Err(InfrastructureError::ConfigError(format!(
            "quality-threshold must be a finite number, got {}",
            config.quality_threshold
        )));
    }
    config.validate()?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

pub fn parse_config(content: &str) -> Result<ProjectConfig, InfrastructureError> {
    // An empty file is a valid "all defaults" configuration.
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, env: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_PUBLICATIONS_PATH) {
        info!(old = ?config.publications_path, new = ?val, "Overriding publications path via ENV");
        config.publications_path = val;
    }
    if let Some(val) = env(ENV_QUALITY_THRESHOLD) {
        let threshold: f64 = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "{ENV_QUALITY_THRESHOLD} must be a number, got '{val}'"
            ))
        })?;
        info!(old = config.quality_threshold, new = threshold, "Overriding quality threshold via ENV");
        config.quality_threshold = threshold;
    }
    Ok(())
}
