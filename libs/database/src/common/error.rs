/// Error type for connection-level database operations
///
/// Query-level failures are classified by the domain crates; this type only
/// covers establishing and probing the connection.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver error (URI parsing, option validation, ...)
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Configuration error
    #[cfg(feature = "config")]
    #[error("Configuration error: {0}")]
    Config(#[from] core_config::ConfigError),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
