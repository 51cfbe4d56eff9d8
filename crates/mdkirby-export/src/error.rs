//! Export error type.

use std::io;
use std::path::{Path, PathBuf};

/// Error returned when writing the content tree fails.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Wrap an I/O error with the path it occurred at.
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
