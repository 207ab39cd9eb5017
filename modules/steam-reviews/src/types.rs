use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CrawlError, Result};

/// Largest app id accepted (seven decimal digits).
pub const MAX_APP_ID: i64 = 9_999_999;

/// App crawled when the caller never names one.
pub const DEFAULT_APP_ID: u32 = 220;

/// A validated Steam app id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppId(u32);

impl AppId {
    pub fn new(raw: i64) -> Result<Self> {
        if (1..=MAX_APP_ID).contains(&raw) {
            Ok(Self(raw as u32))
        } else {
            Err(CrawlError::InvalidIdentifier(raw))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for AppId {
    fn default() -> Self {
        Self(DEFAULT_APP_ID)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-page metadata for one app. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub app_id: AppId,
    pub game_name: Option<String>,
    pub franchise: Option<String>,
}

/// A review in the export schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedReview {
    pub id: u32,
    pub author: Uuid,
    pub date: NaiveDate,
    pub hours: u64,
    pub content: String,
    pub comments: u64,
    pub source: String,
    pub helpful: u64,
    pub funny: u64,
    pub recommended: bool,
    pub franchise: Option<String>,
    #[serde(rename = "gameName")]
    pub game_name: Option<String>,
}
