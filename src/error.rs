use thiserror::Error;

/// Errors returned by the data-access layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("invalid connection settings: {0}")]
    InvalidSettings(String),

    /// The pool could not be created or failed its liveness probe.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("a user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
