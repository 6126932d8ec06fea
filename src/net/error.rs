//! Errors produced by the REST client.

/// Failure of a single API call.
///
/// Every variant is reported to the user by whichever panel or controller
/// issued the call; none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never produced a response (connect, DNS, reset).
    #[error("{method} {url} failed: {message}")]
    Transport { method: String, url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{method} {url} returned HTTP {status}")]
    Status { method: String, url: String, status: u16, body: String },

    /// A request payload could not be serialized to JSON.
    #[error("could not encode request body for {url}: {message}")]
    Encode { url: String, message: String },

    /// The response body was not the JSON we expected.
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::ClientBuild(_) | Self::Transport { .. } | Self::Encode { .. } | Self::Decode { .. } => None,
        }
    }
}
