use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `file_name` inside an existing release directory.
///
/// The bytes go to a temporary file in `dir` first, are flushed to disk, and the
/// file is then renamed into place. A reader never sees a half written file: it
/// either exists with its full content or does not exist. Nothing is undone
/// across files, so a failure on a later file leaves the earlier ones in place.
pub fn write_release_file<C: AsRef<[u8]>>(
    dir: &Path,
    file_name: &str,
    content: C,
) -> Result<PathBuf, InfrastructureError> {
    let target = dir.join(file_name);

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_ref())?;
    staged.as_file().sync_all()?;

    // Releases are immutable: refuse to replace an existing file.
    staged
        .persist_noclobber(&target)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(target)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_release_file_creates_file() -> Result<()> {
        let dir = tempdir()?;

        let path = write_release_file(dir.path(), "metadata.json", "{\"registros\": 3}")?;

        assert_eq!(path, dir.path().join("metadata.json"));
        assert_eq!(fs::read_to_string(path)?, "{\"registros\": 3}");
        Ok(())
    }

    #[test]
    fn test_write_release_file_never_overwrites() -> Result<()> {
        let dir = tempdir()?;
        write_release_file(dir.path(), "boletin.html", "first")?;

        let second = write_release_file(dir.path(), "boletin.html", "second");

        assert!(second.is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("boletin.html"))?,
            "first"
        );
        // No staging file left behind.
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_write_release_file_missing_dir() {
        let result = write_release_file(Path::new("/nonexistent/release"), "a.csv", "x");
        assert!(matches!(result, Err(InfrastructureError::Io(_))));
    }
}
