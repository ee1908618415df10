use thiserror::Error;

/// Failures raised by an [`AccountStore`](crate::storage::AccountStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("failed to connect to account store: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to prepare account schema: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("account store query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Failures of a registration call. `AlreadyExists` is an outcome, not an error.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("invalid registration request: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}
