use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a trace profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile is empty")]
    Empty,
}
