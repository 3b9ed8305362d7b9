use thiserror::Error;

/// Failure taxonomy for API calls.
///
/// `NotFound` is separate from `Api` so callers can degrade gracefully when a
/// referenced record is merely absent (e.g. an unknown author on a like
/// resolves to a display fallback instead of an error).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, timeout, invalid body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the API, with the server's message when the
    /// body carried one.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
}

impl ApiError {
    /// True when this error means the record is absent rather than the call
    /// having failed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
