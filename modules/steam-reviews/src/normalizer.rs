use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use steam_client::RawReview;
use uuid::Uuid;

use crate::error::{CrawlError, Result};
use crate::types::{Metadata, NormalizedReview};

/// Namespace for name-based author ids. Changing it re-keys every author.
pub const AUTHOR_NAMESPACE: Uuid = Uuid::from_u128(0x2E3E41A4_5BF3_F2F0_09D7_3F28E04DA548);

/// Source tag stamped on every review from the Steam review API.
pub const STEAM_SOURCE: &str = "steam";

/// Maps raw API reviews onto [`NormalizedReview`]. Pure: no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewNormalizer {
    namespace: Uuid,
    source: &'static str,
}

impl ReviewNormalizer {
    pub fn new(namespace: Uuid, source: &'static str) -> Self {
        Self { namespace, source }
    }

    pub fn steam() -> Self {
        Self::new(AUTHOR_NAMESPACE, STEAM_SOURCE)
    }

    pub fn normalize(&self, raw: &Value, metadata: &Metadata) -> Result<NormalizedReview> {
        let review = RawReview::deserialize(raw)
            .map_err(|e| CrawlError::MalformedReview(e.to_string()))?;
        let author = raw
            .get("author")
            .ok_or_else(|| CrawlError::MalformedReview("missing field `author`".to_string()))?;
        let created = DateTime::<Utc>::from_timestamp(review.timestamp_created, 0).ok_or_else(|| {
            CrawlError::MalformedReview(format!(
                "timestamp_created {} is out of range",
                review.timestamp_created
            ))
        })?;

        Ok(NormalizedReview {
            id: crc32fast::hash(canonical_json(raw).as_bytes()),
            author: Uuid::new_v3(&self.namespace, canonical_json(author).as_bytes()),
            date: created.date_naive(),
            hours: review.author.playtime_forever / 60,
            content: review.review,
            comments: review.comment_count,
            source: self.source.to_string(),
            helpful: review.votes_up,
            funny: review.votes_funny,
            recommended: review.voted_up,
            franchise: metadata.franchise.clone(),
            game_name: metadata.game_name.clone(),
        })
    }
}

impl Default for ReviewNormalizer {
    fn default() -> Self {
        Self::steam()
    }
}

/// Compact JSON with object keys sorted at every level.
///
/// Review ids and author ids are derived from this form, so they do not depend
/// on the field order the API happened to send. The explicit sort keeps that
/// true if serde_json's `preserve_order` feature gets enabled somewhere in the
/// dependency graph.
pub fn canonical_json(value: &Value) -> String {
    canonicalize(value).to_string()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
