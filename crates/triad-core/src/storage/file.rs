use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::OutputConfig;

use super::error::StorageError;
use super::{report_file_name, ReportStore};

/// File-based report storage.
///
/// Writes one Markdown file per query into a single directory:
/// ```text
/// <output dir>/
///   Report_<sanitized query>.md
/// ```
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage writing into the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates storage from the output configuration.
    pub fn with_config(config: &OutputConfig) -> Self {
        Self::new(config.dir_path())
    }

    /// Returns the path a query's report is written to.
    pub fn report_path(&self, query: &str) -> PathBuf {
        self.dir.join(report_file_name(query))
    }

    /// Ensures the output directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        }
        Ok(())
    }
}

impl ReportStore for FileStorage {
    fn save_report(&self, query: &str, markdown: &str) -> Result<PathBuf, StorageError> {
        self.ensure_dir()?;

        let path = self.report_path(query);
        fs::write(&path, markdown).map_err(|e| StorageError::io(&path, e))?;

        info!(path = %path.display(), "Report saved");
        Ok(path)
    }
}
