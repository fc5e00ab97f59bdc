use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enumerated value (role, status, notification kind) is not recognised.
    ///
    /// Indicates rows written outside the application or a missing migration.
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unrecognised {kind} value stored in database: '{value}'")]
    InvalidStoredValue {
        /// Which enumeration failed to parse
        kind: &'static str,
        /// The stored string
        value: String,
    },

    /// Password hashing or verification failed inside bcrypt.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Signing an access token failed.
    #[error("Failed to sign access token: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// A blocking task panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// A row expected to exist after a write could not be read back.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite {
        /// Entity name
        entity: &'static str,
        /// Primary key that was written
        id: i32,
    },
}
