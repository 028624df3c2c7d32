//! Error types for the remote control

/// Result type alias for remote-control operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to Spotify or the presentation shell
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The playback API answered with a non-success status
    #[error("playback API returned {status}")]
    RemoteApi { status: reqwest::StatusCode },

    /// The OAuth redirect arrived without a `code` query parameter
    #[error("authorization redirect did not carry a code parameter")]
    AuthCodeMissing,

    /// No OAuth callback arrived within the wait window
    #[error("authentication timed out")]
    AuthTimeout,

    /// Input rejected before any network call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Cooperative shutdown observed at a suspension point
    #[error("operation cancelled")]
    Cancelled,

    /// A required credential key is absent from the environment
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

impl Error {
    /// True for the shutdown signal, which callers unwind on rather than log.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
