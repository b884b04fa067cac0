// Feed Loading Errors
//
// Two classes matter to callers: required feeds (port regions, the two
// station datasets) whose failure abandons the catalog build, and optional
// feeds (authoritative ports, status metadata, circuits) which degrade to
// empty defaults inside the loader and never reach the caller as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error fetching {feed}: {source}")]
    Network {
        feed: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {feed}: {source}")]
    Io {
        feed: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {feed}: {message}")]
    Parse { feed: &'static str, message: String },
}

impl FeedError {
    /// Which feed produced this error
    pub fn feed(&self) -> &'static str {
        match self {
            FeedError::Network { feed, .. } => feed,
            FeedError::Io { feed, .. } => feed,
            FeedError::Parse { feed, .. } => feed,
        }
    }
}
