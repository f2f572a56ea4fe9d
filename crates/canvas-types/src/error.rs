use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid document JSON: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
