//! Remote-source error type wrapping reqwest errors.

use homedeck_domain::error::HomeDeckError;

/// Errors originating from talking to the remote API.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request could not be sent, timed out, or its body could not be
    /// read or decoded.
    #[error("request failed")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The server answered `{ "success": false }`.
    #[error("server rejected the request: {0}")]
    Rejected(String),

    /// The configured base URL is unusable.
    #[error("invalid base url {0}")]
    InvalidUrl(String),
}

impl From<RemoteError> for HomeDeckError {
    fn from(err: RemoteError) -> Self {
        Self::Storage(Box::new(err))
    }
}
