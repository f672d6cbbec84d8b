use std::path::PathBuf;

use dropzone_core::BoardError;

/// Errors that can occur when loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("scenario validation error: {0}")]
    Validation(#[from] BoardError),
}

/// Errors that can stop a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to open events file {path}: {source}")]
    EventsOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read event on line {line}: {source}")]
    EventRead {
        line: usize,
        source: std::io::Error,
    },

    #[error("scenario error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
