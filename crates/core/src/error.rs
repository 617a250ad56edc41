//! Error types for coachdesk.

use crate::field::FieldKey;
use coachdesk_sheet::SheetError;
use thiserror::Error;

/// Result type for coachdesk operations.
pub type DeskResult<T> = Result<T, DeskError>;

/// Errors raised at the edges of the core: collaborators, configuration
/// and user edits. Parsing a grid never fails.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Transport-level failure talking to the scripting endpoint.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered but reported an error of its own.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An edit outside the option catalog.
    #[error("'{value}' is not a valid {field} option")]
    InvalidOption { field: FieldKey, value: String },

    /// An edit addressed to a student not in the class.
    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    /// Grid loading error.
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DeskError {
    /// Create an invalid-option error.
    pub fn invalid_option(field: FieldKey, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            value: value.into(),
        }
    }
}
