use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{CrawlError, Result};
use crate::types::NormalizedReview;

/// Write reviews as one compact JSON array. Non-ASCII text is written as-is.
/// Missing parent directories are created.
pub async fn write_reviews(path: &Path, reviews: &[NormalizedReview]) -> Result<()> {
    let bytes = serde_json::to_vec(reviews)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| CrawlError::Output {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| CrawlError::Output {
            path: path.to_path_buf(),
            source,
        })
}

/// Pretty JSON with four-space indentation, for printing to stdout.
pub fn to_pretty_json(reviews: &[NormalizedReview]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    reviews.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
