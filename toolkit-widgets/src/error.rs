//! Widget error types.

use thiserror::Error;

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Imported backup was not a valid toolkit data document.
    #[error("invalid backup file: {0}")]
    InvalidBackup(#[source] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid shortcut key: {0:?}")]
    InvalidShortcut(String),

    #[error("duplicate command id: {0}")]
    DuplicateCommand(String),
}
