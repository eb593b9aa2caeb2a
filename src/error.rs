//! Error types for loading catalogs and engine configuration.
//!
//! The search itself has no error type: an infeasible request yields an
//! empty schedule list.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a course catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("catalog file not found: {path}")]
    NotFound { path: PathBuf },

    /// Reading the catalog failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog is not valid feed JSON.
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading or checking an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The config is not valid JSON for the expected shape.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    /// The config parsed but holds unusable values.
    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}
