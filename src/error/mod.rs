mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Cannot determine version from '{0}'")]
    VersionParse(String),

    #[error("Cannot resolve {missing} for '{filename}'")]
    UnresolvedPlatform {
        filename: String,
        missing: &'static str,
    },

    #[error("Feed unavailable at {url}: {reason}")]
    FeedUnavailable { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid catalog file {path}: {reason}")]
    InvalidCatalog { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
