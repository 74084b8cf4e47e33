//! Typed error enum for the service layer.

use devotional_storage::StorageError;
use thiserror::Error;

/// Errors that end a job run. Per-attempt rejections never surface here;
/// they are retried until the attempt budget runs out.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// History lookup or insert failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// The accepted message could not be written to the outbox.
    #[error("outbox staging failed: {0}")]
    Staging(#[source] std::io::Error),

    /// Every attempt was rejected or failed.
    #[error(
        "no acceptable devotional after {attempts} attempts (last: {})",
        .last_rejection.as_deref().unwrap_or("none")
    )]
    GenerationExhausted { attempts: u32, last_rejection: Option<String> },

    /// The external delivery command could not be run, or its status file
    /// could not be read.
    #[error("delivery: {0}")]
    Delivery(String),
}
