use serde::{Deserialize, Serialize};

/// Cursor value the review API treats as "first page".
pub const FIRST_PAGE_CURSOR: &str = "*";

/// Query string for `GET /appreviews/{app_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewQuery {
    pub json: u8,
    pub filters: String,
    pub purchase_type: String,
    pub day_range: u32,
    pub cursor: String,
    pub num_per_page: u32,
}

impl ReviewQuery {
    /// Query for the first page: every review, every purchase type.
    pub fn first_page(day_range: u32, num_per_page: u32) -> Self {
        Self {
            json: 1,
            filters: "all".to_string(),
            purchase_type: "all".to_string(),
            day_range,
            cursor: FIRST_PAGE_CURSOR.to_string(),
            num_per_page,
        }
    }

    /// Same query, positioned at `cursor`.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }
}

/// One page of the review API response.
///
/// Reviews stay as raw JSON so callers can checksum the record exactly as it
/// was received; use [`RawReview`] for the typed view.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsPage {
    pub success: i64,
    pub cursor: String,
    #[serde(default)]
    pub reviews: Vec<serde_json::Value>,
    #[serde(default)]
    pub query_summary: Option<QuerySummary>,
}

/// Summary block. Totals are only populated on the first page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySummary {
    pub num_reviews: Option<u32>,
    pub review_score_desc: Option<String>,
    pub total_positive: Option<u64>,
    pub total_negative: Option<u64>,
    pub total_reviews: Option<u64>,
}

/// Typed view over a single review record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    pub recommendationid: Option<String>,
    pub author: ReviewAuthor,
    pub language: Option<String>,
    pub review: String,
    pub timestamp_created: i64,
    pub voted_up: bool,
    pub votes_up: u64,
    pub votes_funny: u64,
    pub comment_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAuthor {
    pub steamid: Option<String>,
    /// Lifetime playtime in minutes.
    pub playtime_forever: u64,
}
