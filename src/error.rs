//! Error types for pr-autopilot

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while routing events and merging pull requests
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing run configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Event payload was missing or malformed
    #[error("event error: {0}")]
    Event(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Platform service failure (used by alternate service implementations)
    #[error("platform error: {0}")]
    Platform(String),

    /// The remote accepted the merge call but did not merge the pull request
    #[error("merge of PR #{number} was rejected: {message}")]
    MergeRejected {
        /// Pull request number
        number: u64,
        /// Message reported by the remote
        message: String,
    },

    /// Underlying octocrab error
    #[error(transparent)]
    Octocrab(#[from] Box<octocrab::Error>),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::Octocrab(Box::new(err))
    }
}
