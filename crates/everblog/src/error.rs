//! CLI error types.

use everblog_config::ConfigError;
use everblog_enml::EnmlError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Enml(#[from] EnmlError),

    #[error("invalid resource manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Manifest(String),
}
