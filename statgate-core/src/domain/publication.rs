// statgate-core/src/domain/publication.rs

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::quality::ValidationReport;

pub const RELEASE_DIR_PREFIX: &str = "release_";
pub const DATA_FILE: &str = "microdatos_publicados.csv";
pub const METADATA_FILE: &str = "metadata.json";
pub const BULLETIN_FILE: &str = "boletin.html";

/// Sign-off record stored as `metadata.json` in every release.
/// Field names on disk are the institutional Spanish ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationMetadata {
    #[serde(rename = "fecha_publicacion")]
    pub published_at: DateTime<Local>,
    #[serde(rename = "registros")]
    pub record_count: u64,
    #[serde(rename = "calidad")]
    pub quality_score: f64,
    #[serde(rename = "aprobado_por")]
    pub approved_by: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl PublicationMetadata {
    pub fn for_report(
        report: &ValidationReport,
        approved_by: impl Into<String>,
        description: impl Into<String>,
        published_at: DateTime<Local>,
    ) -> Self {
        Self {
            published_at,
            record_count: report.total_records,
            quality_score: report.quality_score,
            approved_by: approved_by.into(),
            description: description.into(),
        }
    }
}

/// Sortable release identifier: `YYYYMMDD_HHMMSS`, plus `_NNN` when several
/// releases were cut within the same second.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion {
    stamp: String,
    sequence: u32,
}

impl ReleaseVersion {
    pub fn from_timestamp(at: &DateTime<Local>) -> Self {
        Self {
            stamp: at.format("%Y%m%d_%H%M%S").to_string(),
            sequence: 0,
        }
    }

    pub fn from_parts(stamp: impl Into<String>, sequence: u32) -> Self {
        Self {
            stamp: stamp.into(),
            sequence,
        }
    }

    pub fn with_sequence(&self, sequence: u32) -> Self {
        Self::from_parts(self.stamp.clone(), sequence)
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn dir_name(&self) -> String {
        format!("{RELEASE_DIR_PREFIX}{self}")
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sequence == 0 {
            write!(f, "{}", self.stamp)
        } else {
            write!(f, "{}_{:03}", self.stamp, self.sequence)
        }
    }
}

impl Serialize for ReleaseVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
