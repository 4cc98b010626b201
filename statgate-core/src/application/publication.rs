// statgate-core/src/application/publication.rs

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Local;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::application::ports::TemplateEngine;
use crate::domain::dataset::Dataset;
use crate::domain::error::DomainError;
use crate::domain::publication::{
    BULLETIN_FILE, DATA_FILE, METADATA_FILE, PublicationMetadata, ReleaseVersion,
};
use crate::error::StatgateError;
use crate::infrastructure::adapters::csv::write_csv;
use crate::infrastructure::bulletin::{BULLETIN_TEMPLATE_NAME, JinjaRenderer};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::write_release_file;

/// Same-second releases get suffixes `_001` .. `_999`.
const MAX_RELEASES_PER_SECOND: u32 = 1000;

/// Writes immutable, versioned release directories under a publications root.
///
/// The publisher trusts the caller's eligibility decision and records
/// `metadata.quality_score` verbatim. Every call creates a new directory; nothing
/// already on disk is modified.
pub struct Publisher<R = JinjaRenderer> {
    root: PathBuf,
    renderer: R,
}

impl Publisher<JinjaRenderer> {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StatgateError> {
        Ok(Self::with_renderer(root, JinjaRenderer::new()?))
    }
}

impl<R: TemplateEngine> Publisher<R> {
    pub fn with_renderer(root: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            root: root.into(),
            renderer,
        }
    }

    /// Publishes `dataset` with its sign-off and returns the release directory.
    ///
    /// Files are written in order data, metadata, bulletin. A failure is returned
    /// as is and the directory keeps whatever was already written.
    #[instrument(skip_all, fields(root = %self.root.display(), records = metadata.record_count))]
    pub fn publish(
        &self,
        dataset: &Dataset,
        metadata: &PublicationMetadata,
    ) -> Result<PathBuf, StatgateError> {
        let requested = ReleaseVersion::from_timestamp(&Local::now());
        let (version, release_dir) = self.claim_release_dir(&requested)?;
        info!(version = %version, dir = %release_dir.display(), "Release directory created");

        write_release_file(&release_dir, DATA_FILE, write_csv(dataset)?)?;

        let metadata_json =
            serde_json::to_string_pretty(metadata).map_err(InfrastructureError::Json)?;
        write_release_file(&release_dir, METADATA_FILE, metadata_json)?;

        let bulletin = self.render_bulletin(&version, metadata)?;
        write_release_file(&release_dir, BULLETIN_FILE, bulletin)?;

        info!(version = %version, "Release published");
        Ok(release_dir)
    }

    /// Creates `release_<version>` exclusively, adding a sequence suffix while the
    /// name is taken. `create_dir` fails on existing entries, so two publishers
    /// racing for one name never share a directory.
    fn claim_release_dir(
        &self,
        requested: &ReleaseVersion,
    ) -> Result<(ReleaseVersion, PathBuf), StatgateError> {
        fs::create_dir_all(&self.root)?;

        for sequence in 0..MAX_RELEASES_PER_SECOND {
            let candidate = requested.with_sequence(sequence);
            let path = self.root.join(candidate.dir_name());
            match fs::create_dir(&path) {
                Ok(()) => return Ok((candidate, path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(dir = %path.display(), "Release name taken, trying next suffix");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(DomainError::ReleaseNameExhausted {
            version: requested.to_string(),
            attempts: MAX_RELEASES_PER_SECOND,
        }
        .into())
    }

    fn render_bulletin(
        &self,
        version: &ReleaseVersion,
        metadata: &PublicationMetadata,
    ) -> Result<String, StatgateError> {
        let context = json!({
            "version": version.to_string(),
            "records": metadata.record_count,
            "quality": metadata.quality_score,
            "approved_by": metadata.approved_by,
            "description": metadata.description,
            "data_file": DATA_FILE,
            "metadata_file": METADATA_FILE,
        });
        self.renderer.render(BULLETIN_TEMPLATE_NAME, &context)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::csv::parse_csv;
    use anyhow::Result;
    use chrono::{DateTime, TimeZone};
    use std::collections::HashSet;
    use std::path::Path;
    use tempfile::tempdir;

    const INPUT: &str = "anio,mes,hogar_id,personas,ingreso_total\n\
                         2024,1,H1,3,1200.5\n2024,13,,0,-4\n2024,2,H3,2,\n";

    fn metadata(published_at: DateTime<Local>) -> PublicationMetadata {
        PublicationMetadata {
            published_at,
            record_count: 3,
            quality_score: 12.34,
            approved_by: "Jefa de Producción Estadística".into(),
            description: "Publicación de prueba: niños, señales & \"comillas\"".into(),
        }
    }

    fn file_names(dir: &Path) -> Result<HashSet<String>> {
        let mut names = HashSet::new();
        for entry in fs::read_dir(dir)? {
            names.insert(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    #[test]
    fn test_publish_writes_exactly_three_files() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path().join("publicaciones"))?;
        let dataset = parse_csv(INPUT)?;

        let dir = publisher.publish(&dataset, &metadata(Local::now()))?;

        assert!(dir.starts_with(root.path().join("publicaciones")));
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("release_"));
        assert_eq!(
            file_names(&dir)?,
            HashSet::from([
                DATA_FILE.to_string(),
                METADATA_FILE.to_string(),
                BULLETIN_FILE.to_string()
            ])
        );
        Ok(())
    }

    #[test]
    fn test_snapshot_is_the_evaluated_dataset() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;
        let dataset = parse_csv(INPUT)?;

        let dir = publisher.publish(&dataset, &metadata(Local::now()))?;

        // Invalid rows are published too, in input order.
        let snapshot = fs::read_to_string(dir.join(DATA_FILE))?;
        let lines: Vec<&str> = snapshot.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "anio,mes,hogar_id,personas,ingreso_total");
        assert!(lines[2].starts_with("2024,13,,0,-4"));
        assert!(lines[3].starts_with("2024,2,H3,2,"));
        Ok(())
    }

    #[test]
    fn test_metadata_round_trip() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;
        let expected = metadata(Local.with_ymd_and_hms(2024, 6, 30, 17, 45, 0).unwrap());

        let dir = publisher.publish(&parse_csv(INPUT)?, &expected)?;

        let raw = fs::read_to_string(dir.join(METADATA_FILE))?;
        // UTF-8 as is, no \u escapes, 2-space indentation.
        assert!(raw.contains("Jefa de Producción Estadística"));
        assert!(raw.contains("niños"));
        assert!(raw.contains("\n  \"registros\": 3"));
        let read_back: PublicationMetadata = serde_json::from_str(&raw)?;
        assert_eq!(read_back, expected);
        Ok(())
    }

    #[test]
    fn test_quality_is_recorded_verbatim() -> Result<()> {
        // No eligibility check here: a 12.34 score is written as given.
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;

        let dir = publisher.publish(&parse_csv(INPUT)?, &metadata(Local::now()))?;

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(METADATA_FILE))?)?;
        assert_eq!(value["calidad"], 12.34);
        Ok(())
    }

    #[test]
    fn test_bulletin_embeds_release_facts() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;

        let dir = publisher.publish(&parse_csv(INPUT)?, &metadata(Local::now()))?;

        let version = dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .trim_start_matches("release_")
            .to_string();
        let html = fs::read_to_string(dir.join(BULLETIN_FILE))?;
        assert!(html.contains(&format!("Publicacion {version}")));
        assert!(html.contains("Registros: <b>3</b>"));
        assert!(html.contains("Calidad: <b>12.34%</b>"));
        assert!(html.contains("Jefa de Producción Estadística"));
        assert!(html.contains("señales &amp; "));
        assert!(html.contains("demostracion (prototipo)"));
        Ok(())
    }

    #[test]
    fn test_bulletin_quality_matches_metadata() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;
        let mut signed = metadata(Local::now());
        signed.quality_score = 97.5;

        let dir = publisher.publish(&parse_csv(INPUT)?, &signed)?;

        let html = fs::read_to_string(dir.join(BULLETIN_FILE))?;
        let raw = fs::read_to_string(dir.join(METADATA_FILE))?;
        assert!(html.contains("Calidad: <b>97.5%</b>"));
        assert!(raw.contains("\"calidad\": 97.5,"));
        Ok(())
    }

    #[test]
    fn test_repeated_publish_creates_distinct_complete_releases() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;
        let dataset = parse_csv(INPUT)?;
        let signed = metadata(Local::now());

        let dirs: Vec<PathBuf> = (0..3)
            .map(|_| publisher.publish(&dataset, &signed))
            .collect::<Result<_, _>>()?;

        let unique: HashSet<&PathBuf> = dirs.iter().collect();
        assert_eq!(unique.len(), 3);
        for dir in &dirs {
            assert_eq!(file_names(dir)?.len(), 3);
            assert_eq!(
                fs::read_to_string(dir.join(DATA_FILE))?,
                fs::read_to_string(dirs[0].join(DATA_FILE))?
            );
        }
        Ok(())
    }

    #[test]
    fn test_taken_name_gets_a_suffix() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::new(root.path())?;
        let requested = ReleaseVersion::from_parts("20240101_000000", 0);
        fs::create_dir(root.path().join("release_20240101_000000"))?;
        fs::create_dir(root.path().join("release_20240101_000000_001"))?;

        let (version, path) = publisher.claim_release_dir(&requested)?;

        assert_eq!(version.to_string(), "20240101_000000_002");
        assert_eq!(path, root.path().join("release_20240101_000000_002"));
        assert!(path.is_dir());
        Ok(())
    }

    #[test]
    fn test_unwritable_root_is_fatal() -> Result<()> {
        let root = tempdir()?;
        // A regular file where the publications root should be.
        let blocker = root.path().join("publicaciones");
        fs::write(&blocker, "not a directory")?;
        let publisher = Publisher::new(&blocker)?;

        let result = publisher.publish(&parse_csv(INPUT)?, &metadata(Local::now()));

        assert!(matches!(
            result,
            Err(StatgateError::Infrastructure(InfrastructureError::Io(_)))
        ));
        Ok(())
    }

    struct FailingRenderer;

    impl TemplateEngine for FailingRenderer {
        fn render(&self, _: &str, _: &serde_json::Value) -> Result<String, StatgateError> {
            Err(StatgateError::InternalError("renderer down".into()))
        }
    }

    #[test]
    fn test_failed_bulletin_leaves_partial_release() -> Result<()> {
        let root = tempdir()?;
        let publisher = Publisher::with_renderer(root.path(), FailingRenderer);

        let result = publisher.publish(&parse_csv(INPUT)?, &metadata(Local::now()));
        assert!(result.is_err());

        // No rollback: data and metadata stay, the bulletin is missing.
        let release = fs::read_dir(root.path())?.next().unwrap()?.path();
        assert_eq!(
            file_names(&release)?,
            HashSet::from([DATA_FILE.to_string(), METADATA_FILE.to_string()])
        );
        Ok(())
    }
}
