//! Cursor-driven fetch loop over the review API.
//!
//! Accounting follows the API's page cap: every request is charged a full
//! page (100) against the remaining target before the response is seen, and
//! each review dropped by the date window is credited back. A page with fewer
//! than 100 raw reviews means the API has nothing more to give.

use serde_json::Value;
use steam_client::{ReviewQuery, ReviewsPage, FIRST_PAGE_CURSOR};
use tracing::{debug, info};

use crate::error::Result;
use crate::filter::DateWindow;
use crate::normalizer::ReviewNormalizer;
use crate::traits::ReviewSource;
use crate::types::{AppId, Metadata, NormalizedReview};

/// Server-side cap on reviews per page.
pub const PAGE_SIZE: i64 = 100;

/// Lookback window sent with every request. Wider ranges slow the API down badly.
pub const DAY_RANGE: u32 = 365;

/// What the loop should do after absorbing a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Continue,
    Exhausted,
}

impl PageOutcome {
    fn of(page: &ReviewsPage) -> Self {
        if (page.reviews.len() as i64) < PAGE_SIZE {
            Self::Exhausted
        } else {
            Self::Continue
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    Exhausted,
}

/// Drives one crawl's worth of page requests. The metadata snapshot and date
/// window are fixed for the lifetime of the engine.
pub struct PaginationEngine<'a> {
    source: &'a dyn ReviewSource,
    normalizer: ReviewNormalizer,
    metadata: Metadata,
    window: Option<DateWindow>,
}

impl<'a> PaginationEngine<'a> {
    pub fn new(
        source: &'a dyn ReviewSource,
        normalizer: ReviewNormalizer,
        metadata: Metadata,
        window: Option<DateWindow>,
    ) -> Self {
        Self {
            source,
            normalizer,
            metadata,
            window,
        }
    }

    /// Fetch until `target` is used up or the API runs dry.
    ///
    /// Any fetch or normalization error aborts the run; nothing accumulated so
    /// far is returned.
    pub async fn run(&self, app_id: AppId, target: i64) -> Result<Vec<NormalizedReview>> {
        let mut cursor = FIRST_PAGE_CURSOR.to_string();
        let mut remaining = target;
        let mut reviews = Vec::new();
        let mut pages = 0usize;

        let reason = loop {
            if remaining <= 0 {
                break StopReason::TargetReached;
            }

            let query = ReviewQuery::first_page(DAY_RANGE, remaining.min(PAGE_SIZE) as u32)
                .with_cursor(cursor.as_str());
            remaining -= PAGE_SIZE;

            let page = self.source.fetch_page(app_id, &query).await?;
            pages += 1;
            if let Some(total) = page.query_summary.as_ref().and_then(|s| s.total_reviews) {
                info!(app_id = app_id.get(), total_reviews = total, "Review API summary");
            }

            let outcome = PageOutcome::of(&page);
            let ReviewsPage {
                cursor: next_cursor,
                reviews: raw,
                ..
            } = page;
            cursor = next_cursor;

            let discarded = self.absorb(&raw, &mut reviews)?;
            remaining += discarded as i64;

            debug!(
                page = pages,
                fetched = raw.len(),
                discarded,
                accumulated = reviews.len(),
                remaining,
                "Page absorbed"
            );

            if outcome == PageOutcome::Exhausted {
                break StopReason::Exhausted;
            }
        };

        info!(
            app_id = app_id.get(),
            pages,
            reviews = reviews.len(),
            ?reason,
            "Pagination finished"
        );
        Ok(reviews)
    }

    /// Normalize a page into `out`, applying the date window. Returns how many
    /// reviews the window rejected.
    fn absorb(&self, raw: &[Value], out: &mut Vec<NormalizedReview>) -> Result<usize> {
        let normalized = raw
            .iter()
            .map(|r| self.normalizer.normalize(r, &self.metadata))
            .collect::<Result<Vec<_>>>()?;

        let Some(window) = self.window else {
            out.extend(normalized);
            return Ok(0);
        };

        let mut discarded = 0;
        for review in normalized {
            if window.contains(review.date) {
                out.push(review);
            } else {
                discarded += 1;
            }
        }
        Ok(discarded)
    }
}
