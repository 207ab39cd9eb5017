pub mod error;
pub mod types;

pub use error::{Result, SteamError};
pub use types::{
    QuerySummary, RawReview, ReviewAuthor, ReviewQuery, ReviewsPage, FIRST_PAGE_CURSOR,
};

use std::time::Duration;

pub const DEFAULT_STORE_URL: &str = "https://store.steampowered.com";

const USER_AGENT: &str = concat!("steam-reviews/", env!("CARGO_PKG_VERSION"));

pub struct SteamClient {
    client: reqwest::Client,
    base_url: String,
}

impl SteamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn reviews_url(&self, app_id: u32) -> String {
        format!("{}/appreviews/{}", self.base_url, app_id)
    }

    pub fn store_page_url(&self, app_id: u32) -> String {
        format!("{}/app/{}/", self.base_url, app_id)
    }

    /// Fetch one page of reviews. The cursor in `query` selects the page.
    pub async fn app_reviews(&self, app_id: u32, query: &ReviewQuery) -> Result<ReviewsPage> {
        let url = self.reviews_url(app_id);
        tracing::debug!(app_id, cursor = %query.cursor, num_per_page = query.num_per_page, "Requesting review page");

        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        check_status(status, body).and_then(|body| parse_reviews_page(&body))
    }

    /// Fetch the raw HTML of an app's store page.
    pub async fn store_page(&self, app_id: u32) -> Result<String> {
        let url = self.store_page_url(app_id);
        tracing::debug!(app_id, %url, "Fetching store page");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        check_status(status, body)
    }
}

/// Pass the body through on a 2xx status, otherwise turn it into an API error.
fn check_status(status: reqwest::StatusCode, body: String) -> Result<String> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(SteamError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// Decode a review API body. The API answers 200 even when it refuses a
/// query, so `success` has to be checked separately.
pub fn parse_reviews_page(body: &str) -> Result<ReviewsPage> {
    let page: ReviewsPage = serde_json::from_str(body)?;
    if page.success != 1 {
        return Err(SteamError::Unsuccessful(page.success));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_strip_trailing_slash() {
        let client = SteamClient::new("https://store.example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.reviews_url(220), "https://store.example.com/appreviews/220");
        assert_eq!(client.store_page_url(397740), "https://store.example.com/app/397740/");
    }

    #[test]
    fn parses_successful_page() {
        let page = parse_reviews_page(
            r#"{"success":1,"cursor":"AoJ4","query_summary":{"num_reviews":1},"reviews":[{"recommendationid":"1"}]}"#,
        )
        .unwrap();
        assert_eq!(page.cursor, "AoJ4");
        assert_eq!(page.reviews.len(), 1);
    }

    #[test]
    fn unsuccessful_flag_is_an_error() {
        let err = parse_reviews_page(r#"{"success":2,"cursor":"*","reviews":[]}"#).unwrap_err();
        assert!(matches!(err, SteamError::Unsuccessful(2)));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let err = parse_reviews_page("<html>Access Denied</html>").unwrap_err();
        assert!(matches!(err, SteamError::Parse(_)));
    }

    #[test]
    fn non_2xx_status_is_api_error() {
        let err = check_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down".to_string())
            .unwrap_err();
        assert!(matches!(
            err,
            SteamError::Api { status: 429, ref message } if message == "slow down"
        ));
    }

    #[test]
    fn ok_status_passes_body_through() {
        let body = check_status(reqwest::StatusCode::OK, "<html/>".to_string()).unwrap();
        assert_eq!(body, "<html/>");
    }
}
