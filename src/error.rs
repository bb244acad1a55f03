use thiserror::Error;
use crate::entities::ArticleId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request to article store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Article store rejected request with status {0}")]
    Rejected(u16),
    #[error("Article not found: {0}")]
    NotFound(ArticleId),
    #[error("Failed to read/write store log: {0}")]
    LogIOError(std::io::Error),
    #[error("Failed to serialize/deserialize store operation: {0}")]
    LogSerializationError(serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Form is not open")]
    NotOpen,
    #[error("Field is required: {0}")]
    Required(&'static str),
}
