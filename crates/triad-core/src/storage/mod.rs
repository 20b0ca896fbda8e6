mod error;
mod file;

pub use error::StorageError;
pub use file::FileStorage;

use std::path::PathBuf;

use crate::config::{DEFAULT_REPORT_EXTENSION, DEFAULT_REPORT_PREFIX, MAX_FILENAME_LEN};

/// Trait for report storage backends.
pub trait ReportStore {
    /// Saves a report for a query and returns where it was written.
    ///
    /// Saving the same query twice overwrites the earlier report.
    fn save_report(&self, query: &str, markdown: &str) -> Result<PathBuf, StorageError>;
}

/// Turns a query into a safe file name fragment.
///
/// Keeps ASCII letters and digits, maps whitespace to `_`, drops everything
/// else and truncates to 50 characters.
pub fn sanitize_filename(query: &str) -> String {
    query
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// The report file name for a query, e.g. `Report_rust_async.md`.
pub fn report_file_name(query: &str) -> String {
    format!(
        "{}{}.{}",
        DEFAULT_REPORT_PREFIX,
        sanitize_filename(query),
        DEFAULT_REPORT_EXTENSION
    )
}
