// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::domain::approval::{ApprovalPolicy, DEFAULT_QUALITY_THRESHOLD};
use crate::domain::quality::{ExpectedColumns, Validator};

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    #[serde(default = "default_publications_path")]
    #[validate(length(min = 1, message = "Publications path cannot be empty"))]
    pub publications_path: String,

    #[serde(default = "default_quality_threshold")]
    #[validate(range(min = 0.0, max = 100.0, message = "Threshold must be within [0, 100]"))]
    pub quality_threshold: f64,

    #[serde(default)]
    #[validate(nested)]
    pub columns: ExpectedColumns,

    #[serde(default)]
    pub approval: ApprovalDefaults,
}

/// Sign-off values proposed when the caller does not provide any.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ApprovalDefaults {
    pub approved_by: String,
    pub description: String,
}

impl Default for ApprovalDefaults {
    fn default() -> Self {
        Self {
            approved_by: "Jefe(a) de Produccion Estadistica".to_string(),
            description: "Publicacion de microdatos y series asociadas (prototipo).".to_string(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            publications_path: default_publications_path(),
            quality_threshold: default_quality_threshold(),
            columns: ExpectedColumns::default(),
            approval: ApprovalDefaults::default(),
        }
    }
}

impl ProjectConfig {
    pub fn approval_policy(&self) -> ApprovalPolicy {
        ApprovalPolicy::new(self.quality_threshold)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.columns.clone())
    }

    pub fn publications_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.publications_path)
    }
}

fn default_publications_path() -> String {
    "publicaciones".to_string()
}
fn default_quality_threshold() -> f64 {
    DEFAULT_QUALITY_THRESHOLD
}
