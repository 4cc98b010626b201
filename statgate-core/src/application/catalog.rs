// statgate-core/src/application/catalog.rs

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::domain::approval::ApprovalPolicy;
use crate::domain::publication::{METADATA_FILE, PublicationMetadata, ReleaseVersion};
use crate::error::StatgateError;
use crate::infrastructure::error::InfrastructureError;

const RELEASE_DIR_PATTERN: &str = r"^release_(\d{8}_\d{6})(?:_(\d{3,}))?$";

// --- DTOs ---

/// One release directory as seen by the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseSummary {
    pub version: ReleaseVersion,
    pub path: PathBuf,
    /// `None` when `metadata.json` is missing or unreadable.
    pub metadata: Option<PublicationMetadata>,
}

impl ReleaseSummary {
    /// A release deserves attention when its sign-off cannot be read or when
    /// its recorded quality is below the current threshold.
    pub fn is_alert(&self, policy: &ApprovalPolicy) -> bool {
        self.metadata
            .as_ref()
            .is_none_or(|m| !policy.accepts_score(m.quality_score))
    }
}

// --- CATALOG SERVICE ---

/// Read-only view over the releases under a publications root.
pub struct ReleaseCatalog {
    pattern: Regex,
}

impl ReleaseCatalog {
    pub fn new() -> Result<Self, InfrastructureError> {
        Ok(Self {
            pattern: Regex::new(RELEASE_DIR_PATTERN)?,
        })
    }

    /// Parses `release_YYYYMMDD_HHMMSS[_NNN]`. Any other name is `None`.
    pub fn parse_dir_name(&self, name: &str) -> Option<ReleaseVersion> {
        let caps = self.pattern.captures(name)?;
        let stamp = caps.get(1)?.as_str();
        let sequence = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        Some(ReleaseVersion::from_parts(stamp, sequence))
    }

    /// Lists releases oldest first. A root that does not exist yet holds no releases.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn list(&self, root: &Path) -> Result<Vec<ReleaseSummary>, StatgateError> {
        if !root.exists() {
            debug!("Publications root does not exist");
            return Ok(Vec::new());
        }

        let mut releases = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            let Some(version) = self.parse_dir_name(&name) else {
                debug!(dir = %name, "Skipping non-release directory");
                continue;
            };
            let path = entry.path().to_path_buf();
            let metadata = read_metadata(&path);
            releases.push(ReleaseSummary {
                version,
                path,
                metadata,
            });
        }

        releases.sort_by(|a, b| a.version.cmp(&b.version));
        Ok(releases)
    }
}

pub fn list_releases(root: &Path) -> Result<Vec<ReleaseSummary>, StatgateError> {
    ReleaseCatalog::new()?.list(root)
}

/// Reads `metadata.json` from a release directory.
pub fn read_metadata(release_dir: &Path) -> Option<PublicationMetadata> {
    let path = release_dir.join(METADATA_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Release metadata unreadable");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Release metadata malformed");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    fn write_release(root: &Path, name: &str, quality: Option<f64>) -> Result<()> {
        let dir = root.join(name);
        fs::create_dir_all(&dir)?;
        if let Some(quality_score) = quality {
            let metadata = PublicationMetadata {
                published_at: Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
                record_count: 10,
                quality_score,
                approved_by: "Jefa".into(),
                description: "Prueba".into(),
            };
            fs::write(dir.join(METADATA_FILE), serde_json::to_string_pretty(&metadata)?)?;
        }
        Ok(())
    }

    #[test]
    fn test_parse_dir_name() -> Result<()> {
        let catalog = ReleaseCatalog::new()?;

        let plain = catalog.parse_dir_name("release_20240307_090502").unwrap();
        assert_eq!(plain.stamp(), "20240307_090502");
        assert_eq!(plain.sequence(), 0);

        let suffixed = catalog.parse_dir_name("release_20240307_090502_012").unwrap();
        assert_eq!(suffixed.sequence(), 12);

        assert!(catalog.parse_dir_name("release_2024").is_none());
        assert!(catalog.parse_dir_name("backup_20240307_090502").is_none());
        assert!(catalog.parse_dir_name("release_20240307_090502_1").is_none());
        Ok(())
    }

    #[test]
    fn test_list_sorted_and_filtered() -> Result<()> {
        let root = tempdir()?;
        write_release(root.path(), "release_20240102_080000", Some(99.0))?;
        write_release(root.path(), "release_20240101_080000_001", Some(96.0))?;
        write_release(root.path(), "release_20240101_080000", Some(97.0))?;
        write_release(root.path(), "borradores", Some(50.0))?;
        fs::write(root.path().join("release_20240103_080000"), "a file, not a release")?;

        let releases = ReleaseCatalog::new()?.list(root.path())?;

        let names: Vec<String> = releases.iter().map(|r| r.version.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "20240101_080000",
                "20240101_080000_001",
                "20240102_080000"
            ]
        );
        assert_eq!(releases[0].metadata.as_ref().unwrap().quality_score, 97.0);
        Ok(())
    }

    #[test]
    fn test_missing_root_is_empty() -> Result<()> {
        let root = tempdir()?;
        let releases = list_releases(&root.path().join("publicaciones"))?;
        assert!(releases.is_empty());
        Ok(())
    }

    #[test]
    fn test_alerts() -> Result<()> {
        let root = tempdir()?;
        write_release(root.path(), "release_20240101_080000", Some(95.0))?;
        write_release(root.path(), "release_20240102_080000", Some(94.99))?;
        write_release(root.path(), "release_20240103_080000", None)?;
        let dir = root.path().join("release_20240104_080000");
        fs::create_dir(&dir)?;
        fs::write(dir.join(METADATA_FILE), "{ not json")?;

        let policy = ApprovalPolicy::default();
        let alerts: Vec<bool> = ReleaseCatalog::new()?
            .list(root.path())?
            .iter()
            .map(|r| r.is_alert(&policy))
            .collect();

        assert_eq!(alerts, vec![false, true, true, true]);
        Ok(())
    }
}
