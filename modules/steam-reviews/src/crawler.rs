use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use steam_client::SteamClient;
use tracing::info;
use typed_builder::TypedBuilder;

use crate::assembler::{assemble, output_file_name};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{parse_optional_filter, DateWindow};
use crate::metadata::MetadataLookup;
use crate::normalizer::ReviewNormalizer;
use crate::pagination::PaginationEngine;
use crate::traits::{ReviewSource, StorePageSource};
use crate::types::{AppId, Metadata, NormalizedReview};

pub const DEFAULT_NUM_REVIEWS: i64 = 5000;

/// Parameters for one crawl.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct CrawlRequest {
    /// Raw app id; `None` keeps the crawler's current app.
    #[builder(default, setter(strip_option))]
    pub app_id: Option<i64>,
    #[builder(default = DEFAULT_NUM_REVIEWS)]
    pub num_reviews: i64,
    /// `YYYY-MM-DD`; an unparseable value is ignored with a warning.
    #[builder(default, setter(strip_option, into))]
    pub filter_from: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub filter_to: Option<String>,
    /// Write the result to the output directory.
    #[builder(default = true)]
    pub persist: bool,
}

#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub app_id: AppId,
    pub metadata: Metadata,
    pub reviews: Vec<NormalizedReview>,
    pub written: Option<PathBuf>,
}

/// Crawls reviews for one app at a time.
///
/// Holds the current app id and its metadata, so one instance must not be
/// shared between concurrent crawls; `crawl` takes `&mut self` for that reason.
pub struct Crawler {
    reviews: Arc<dyn ReviewSource>,
    lookup: MetadataLookup,
    normalizer: ReviewNormalizer,
    out_dir: PathBuf,
    app_id: AppId,
}

impl Crawler {
    pub fn new(
        reviews: Arc<dyn ReviewSource>,
        pages: Arc<dyn StorePageSource>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reviews,
            lookup: MetadataLookup::new(pages),
            normalizer: ReviewNormalizer::steam(),
            out_dir: out_dir.into(),
            app_id: AppId::default(),
        }
    }

    /// Production crawler talking to the Steam store.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(SteamClient::new(&config.store_url, config.request_timeout)?);
        Ok(Self::new(client.clone(), client, config.out_dir.clone()))
    }

    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.lookup.current()
    }

    pub async fn crawl(&mut self, request: CrawlRequest) -> Result<CrawlOutput> {
        let app_id = match request.app_id {
            Some(raw) => AppId::new(raw)?,
            None => self.app_id,
        };

        let metadata = match self.lookup.current().filter(|m| m.app_id == app_id) {
            Some(current) => current.clone(),
            None => self.lookup.set_identifier(app_id).await?.clone(),
        };
        self.app_id = app_id;

        let from = parse_optional_filter(request.filter_from.as_deref());
        let to = parse_optional_filter(request.filter_to.as_deref());
        let window = DateWindow::resolve(from, to, Utc::now().date_naive());

        info!(
            app_id = app_id.get(),
            num_reviews = request.num_reviews,
            ?window,
            persist = request.persist,
            "Starting review crawl"
        );

        let engine = PaginationEngine::new(
            self.reviews.as_ref(),
            self.normalizer,
            metadata.clone(),
            window,
        );
        let reviews = engine.run(app_id, request.num_reviews).await?;

        let target = request
            .persist
            .then(|| self.out_dir.join(output_file_name(app_id, from, to)));
        let assembled = assemble(reviews, target.as_deref()).await?;

        info!(
            "{} reviews for {} retrieved successfully.",
            assembled.reviews.len(),
            metadata.game_name.as_deref().unwrap_or("<unknown app>")
        );
        if let Some(path) = &assembled.written {
            info!(path = %path.display(), "Committed review list");
        }

        Ok(CrawlOutput {
            app_id,
            metadata,
            reviews: assembled.reviews,
            written: assembled.written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let request = CrawlRequest::builder().build();
        assert_eq!(request.app_id, None);
        assert_eq!(request.num_reviews, 5000);
        assert_eq!(request.filter_from, None);
        assert_eq!(request.filter_to, None);
        assert!(request.persist);
    }

    #[test]
    fn request_setters() {
        let request = CrawlRequest::builder()
            .app_id(397740)
            .num_reviews(10)
            .filter_from("2024-01-01")
            .persist(false)
            .build();
        assert_eq!(request.app_id, Some(397740));
        assert_eq!(request.filter_from.as_deref(), Some("2024-01-01"));
        assert!(!request.persist);
    }
}
