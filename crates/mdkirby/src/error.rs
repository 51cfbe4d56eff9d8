//! CLI error types.

use mdkirby_config::ConfigError;
use mdkirby_export::ExportError;
use mdkirby_source::SourceError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Export(#[from] ExportError),
}
