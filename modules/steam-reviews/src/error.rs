use std::path::PathBuf;

use steam_client::SteamError;

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, CrawlError>;

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("Invalid app id {0}: expected a positive integer of at most 7 digits")]
    InvalidIdentifier(i64),

    #[error("Filter date {0:?} is not in format YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Malformed review: {0}")]
    MalformedReview(String),

    #[error(transparent)]
    Network(#[from] SteamError),

    #[error("Failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
