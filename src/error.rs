//! Error types for the listings data layer

use thiserror::Error;

/// Failure on the remote provider path.
///
/// These never reach callers of `PropertyRepository::query`; they are handed to
/// the query observer and the fixture data is served instead.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no API key configured for the listings provider")]
    MissingApiKey,

    #[error("listings provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("listings provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("listings provider sent a malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RemoteError {
    /// Short label used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::MissingApiKey => "missing_api_key",
            RemoteError::Transport(_) => "transport",
            RemoteError::Status { .. } => "status",
            RemoteError::Malformed(_) => "malformed",
        }
    }
}

/// A query filter that cannot be executed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("limit must be at least 1")]
    ZeroLimit,

    #[error("min_price {min} is greater than max_price {max}")]
    InvertedPriceRange { min: u64, max: u64 },
}
