use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown belief: {name}")]
    UnknownBelief { name: String },

    #[error("Invalid distribution: {reason}")]
    InvalidDistribution { reason: String },

    #[error("Invalid network: {reason}")]
    InvalidNetwork { reason: String },

    #[error("Output directory already exists: {}", path.display())]
    OutputExists { path: PathBuf },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    #[error("Generation task failed: {reason}")]
    Task { reason: String },
}

impl ScenarioError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScenarioError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure came from user-supplied settings rather than the
    /// environment.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScenarioError::InvalidConfig { .. }
                | ScenarioError::UnknownBelief { .. }
                | ScenarioError::InvalidDistribution { .. }
                | ScenarioError::InvalidNetwork { .. }
        )
    }
}
