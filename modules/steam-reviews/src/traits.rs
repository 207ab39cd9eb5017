// Trait seams for everything that touches the network.
//
// ReviewSource — one page of the cursor-paginated review API.
// StorePageSource — raw HTML of an app's store page.
//
// SteamClient implements both; tests swap in MockReviewSource / MockStorePage.

use async_trait::async_trait;
use steam_client::{ReviewQuery, ReviewsPage, SteamClient};

use crate::types::AppId;

#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch the page of reviews selected by `query.cursor`.
    async fn fetch_page(&self, app_id: AppId, query: &ReviewQuery) -> steam_client::Result<ReviewsPage>;
}

#[async_trait]
pub trait StorePageSource: Send + Sync {
    /// Fetch the store page markup for an app.
    async fn fetch_store_page(&self, app_id: AppId) -> steam_client::Result<String>;
}

#[async_trait]
impl ReviewSource for SteamClient {
    async fn fetch_page(&self, app_id: AppId, query: &ReviewQuery) -> steam_client::Result<ReviewsPage> {
        self.app_reviews(app_id.get(), query).await
    }
}

#[async_trait]
impl StorePageSource for SteamClient {
    async fn fetch_store_page(&self, app_id: AppId) -> steam_client::Result<String> {
        self.store_page(app_id.get()).await
    }
}
