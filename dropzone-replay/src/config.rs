//! Scenario files: the starting pieces and kanban columns a replay runs on.
//!
//! ```toml
//! [[pieces]]
//! kind = "king"
//! location = [3, 2]
//!
//! [[columns]]
//! id = 1
//! name = "Backlog"
//!
//! [[columns.content]]
//! id = 1
//! title = "Create the cards"
//! ```

use std::path::Path;

use dropzone_core::kanban::validate_columns;
use dropzone_core::{starting_pieces, validate_pieces, Column, DropSession, KanbanBoard, Piece};

use crate::error::ConfigError;

/// Starting state for a replay, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub pieces: Vec<Piece>,
    pub columns: Vec<Column>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            pieces: starting_pieces(),
            columns: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate a scenario from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ScenarioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a scenario, falling back to the tutorial starting position if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(
                path = %path.display(),
                "scenario file not found, using the starting position"
            );
            Ok(Self::default())
        }
    }

    /// Check the invariants the engines rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pieces(&self.pieces)?;
        validate_columns(&self.columns)?;
        Ok(())
    }

    /// Build the session a replay starts from.
    pub fn into_session(self) -> Result<DropSession, ConfigError> {
        let board = KanbanBoard::try_from(self.columns)?;
        Ok(DropSession::new(self.pieces, board)?)
    }
}
