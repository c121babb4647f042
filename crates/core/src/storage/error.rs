use thiserror::Error;

use crate::document::TimestampError;
use crate::membership::MembershipError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] MembershipError),
}

impl From<TimestampError> for RepositoryError {
    fn from(err: TimestampError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
