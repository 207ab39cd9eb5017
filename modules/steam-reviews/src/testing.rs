// Test mocks for the crawl pipeline.
//
// Two mocks matching the two network seams:
// - MockReviewSource (ReviewSource) — scripted pages served in order, every query recorded
// - MockStorePage (StorePageSource) — HashMap-based app id → HTML, fetches counted
//
// Plus builders for raw review JSON.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use steam_client::{ReviewQuery, ReviewsPage, SteamError};

use crate::traits::{ReviewSource, StorePageSource};
use crate::types::AppId;

// ---------------------------------------------------------------------------
// Raw review builders
// ---------------------------------------------------------------------------

/// A well-formed raw review as the API returns it.
pub fn raw_review(author: &str, timestamp: i64, content: &str) -> Value {
    json!({
        "recommendationid": format!("{author}-{timestamp}"),
        "author": {
            "steamid": author,
            "num_games_owned": 12,
            "num_reviews": 3,
            "playtime_forever": 600,
            "last_played": timestamp
        },
        "language": "english",
        "review": content,
        "timestamp_created": timestamp,
        "timestamp_updated": timestamp,
        "voted_up": true,
        "votes_up": 0,
        "votes_funny": 0,
        "weighted_vote_score": "0.5",
        "comment_count": 0,
        "steam_purchase": true,
        "received_for_free": false,
        "written_during_early_access": false
    })
}

/// `count` distinct reviews, one per day going back from `newest`.
pub fn review_batch(tag: &str, newest: i64, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            raw_review(
                &format!("{tag}-author-{i}"),
                newest - (i as i64) * 86_400,
                &format!("{tag} review {i}"),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MockReviewSource
// ---------------------------------------------------------------------------

enum Scripted {
    Page(Vec<Value>),
    Fail(String),
}

/// Serves scripted pages in order and records every query it receives.
/// Returns a network error once the script runs out.
pub struct MockReviewSource {
    script: Mutex<VecDeque<Scripted>>,
    queries: Mutex<Vec<(AppId, ReviewQuery)>>,
}

impl MockReviewSource {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(self, reviews: Vec<Value>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Page(reviews));
        self
    }

    /// Queue `pages` full pages of 100 distinct reviews each.
    pub fn with_full_pages(mut self, pages: usize) -> Self {
        for p in 0..pages {
            self = self.with_page(review_batch(&format!("page{p}"), 1_700_000_000, 100));
        }
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<(AppId, ReviewQuery)> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockReviewSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewSource for MockReviewSource {
    async fn fetch_page(&self, app_id: AppId, query: &ReviewQuery) -> steam_client::Result<ReviewsPage> {
        let served = {
            let mut queries = self.queries.lock().unwrap();
            queries.push((app_id, query.clone()));
            queries.len()
        };

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Page(reviews)) => Ok(ReviewsPage {
                success: 1,
                cursor: format!("cursor-{served}"),
                reviews,
                query_summary: None,
            }),
            Some(Scripted::Fail(message)) => Err(SteamError::network(message)),
            None => Err(SteamError::network(format!("no page scripted for request {served}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// MockStorePage
// ---------------------------------------------------------------------------

/// HashMap-based store page source. Returns `Err` for unregistered apps.
pub struct MockStorePage {
    pages: HashMap<u32, String>,
    fetches: Mutex<HashMap<u32, usize>>,
}

impl MockStorePage {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            fetches: Mutex::new(HashMap::new()),
        }
    }

    pub fn on_app(mut self, app_id: u32, html: &str) -> Self {
        self.pages.insert(app_id, html.to_string());
        self
    }

    /// Register a page carrying the given name and franchise banner.
    pub fn on_app_named(self, app_id: u32, name: &str, franchise: Option<&str>) -> Self {
        let franchise_block = franchise
            .map(|f| {
                format!(r#"<div class="franchise_name"><a>Check out the entire {f} Franchise on Steam</a></div>"#)
            })
            .unwrap_or_default();
        let html = format!(
            r#"<html><body><div class="apphub_AppName">{name}</div>{franchise_block}</body></html>"#
        );
        self.on_app(app_id, &html)
    }

    pub fn fetch_count(&self, app_id: AppId) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(&app_id.get())
            .copied()
            .unwrap_or(0)
    }
}

impl Default for MockStorePage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorePageSource for MockStorePage {
    async fn fetch_store_page(&self, app_id: AppId) -> steam_client::Result<String> {
        *self.fetches.lock().unwrap().entry(app_id.get()).or_insert(0) += 1;
        self.pages
            .get(&app_id.get())
            .cloned()
            .ok_or_else(|| SteamError::Api {
                status: 404,
                message: format!("no store page registered for app {app_id}"),
            })
    }
}
