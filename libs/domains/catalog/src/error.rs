use mongodb::error::{ErrorKind, TRANSIENT_TRANSACTION_ERROR, WriteFailure};
use thiserror::Error;

use crate::models::ItemId;

/// Server code for a write that lost a concurrency race
const WRITE_CONFLICT: i32 = 112;

/// Server codes for queries the server refused to run as written
/// (BadValue, FailedToParse, TypeMismatch, IndexNotFound)
const QUERY_ERROR_CODES: [i32; 4] = [2, 9, 14, 27];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database unavailable: {0}")]
    Connection(String),

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Whether re-issuing the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Conflict(_))
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        if err.contains_label(TRANSIENT_TRANSACTION_ERROR) {
            return CatalogError::Conflict(err.to_string());
        }

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => CatalogError::Connection(err.to_string()),
            ErrorKind::Command(command) if command.code == WRITE_CONFLICT => {
                CatalogError::Conflict(err.to_string())
            }
            ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == WRITE_CONFLICT => {
                CatalogError::Conflict(err.to_string())
            }
            ErrorKind::Command(command) if QUERY_ERROR_CODES.contains(&command.code) => {
                CatalogError::Query(err.to_string())
            }
            ErrorKind::InvalidArgument { .. } => CatalogError::Query(err.to_string()),
            _ => CatalogError::Database(err.to_string()),
        }
    }
}

impl From<mongodb::bson::de::Error> for CatalogError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        CatalogError::Database(format!("failed to decode document: {}", err))
    }
}

impl From<mongodb::bson::ser::Error> for CatalogError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        CatalogError::Database(format!("failed to encode document: {}", err))
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        CatalogError::Validation(err.to_string())
    }
}
