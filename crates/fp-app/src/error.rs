//! Error types for the fp-app service layer.

use fp_model::ModelError;

/// Application error type that wraps errors from the backing crates and
/// provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Unknown model name: {0}")]
    UnknownModel(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownModel(name) => AppError::UnknownModel(name),
            other => AppError::Model(other.to_string()),
        }
    }
}
