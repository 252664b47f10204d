// Error types for shoulder

use thiserror::Error;

/// Result type alias for shoulder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using shoulder
#[derive(Debug, Error)]
pub enum Error {
    /// A condition was evaluated against an entity and did not hold.
    ///
    /// Carries the human-readable description of what was expected, e.g.
    /// `have exact text 'Invalid', but was 'Test'`. The retrying waiter treats
    /// this as "not yet matching" and keeps polling until its deadline.
    #[error("{0}")]
    ConditionMismatch(String),

    /// Terminal failure of a `should` assertion: no poll iteration matched
    /// before the deadline. The message carries the entity's addressing text,
    /// the last mismatch reason and the timeout that elapsed.
    #[error("{entity} should {reason}. Wait timed out after {timeout_ms}ms")]
    WaitTimeout {
        entity: String,
        reason: String,
        timeout_ms: u128,
    },

    /// An element action failed twice: once initially and once more after the
    /// forced visibility wait. Never retried again above this layer.
    #[error("{0}")]
    CannotPerformAction(String),

    /// Element lookup produced no match
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Error reported by the underlying driver client
    #[error("Driver error: {0}")]
    Driver(String),

    /// Invalid argument provided to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error (failure-hook file output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
