use std::error::Error;
use thiserror::Error;

/// Result alias used by every [`crate::dao::score_store::ScoreStore`] method.
pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-agnostic storage failure.
///
/// The service layer only ever reacts one way to a broken store (surface
/// 503 and let the supervisor reconnect), so backends collapse their error
/// enums into this single variant and keep the detail in `source`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or the operation failed mid-flight.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human-readable description of what failed.
        message: String,
        /// Backend-specific error retained for logs.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wrap a backend failure, keeping it as the error source.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
