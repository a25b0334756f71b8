use thiserror::Error;

/// Everything here is recoverable by user retry; callers catch, surface a
/// message, and leave prior state unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required field is missing before a mutating action.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure talking to a collaborator.
    #[error("request failed: {0}")]
    Remote(#[from] reqwest::Error),

    /// Collaborator answered with a non-2xx status.
    #[error("remote returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Cart(#[from] contracts::domain::CartError),
}
