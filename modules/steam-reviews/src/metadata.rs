//! Store-page metadata lookup.
//!
//! All knowledge of the store page markup lives here: the class names of the
//! title and franchise blocks and the wording of the franchise banner.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use scraper::{Html, Selector};
use tracing::info;

use crate::error::Result;
use crate::traits::StorePageSource;
use crate::types::{AppId, Metadata};

static NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.apphub_AppName").expect("valid selector"));

static FRANCHISE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.franchise_name").expect("valid selector"));

/// "Check out the entire Crusader Kings Official Franchise on Steam"
static FRANCHISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ee]ntire (.*?) [Ff]ranchise").expect("valid regex"));

/// Holds the metadata for the app currently being crawled.
pub struct MetadataLookup {
    source: Arc<dyn StorePageSource>,
    current: Option<Metadata>,
}

impl MetadataLookup {
    pub fn new(source: Arc<dyn StorePageSource>) -> Self {
        Self {
            source,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Metadata> {
        self.current.as_ref()
    }

    /// Switch to `app_id`: fetch its store page once and replace both fields.
    ///
    /// On a fetch error the previous metadata is left untouched.
    pub async fn set_identifier(&mut self, app_id: AppId) -> Result<&Metadata> {
        let html = self.source.fetch_store_page(app_id).await?;
        let metadata = extract_metadata(app_id, &html);
        info!(
            app_id = app_id.get(),
            game_name = ?metadata.game_name,
            franchise = ?metadata.franchise,
            "Store page metadata refreshed"
        );
        Ok(self.current.insert(metadata))
    }
}

/// Parse a store page and pull out both metadata fields.
pub fn extract_metadata(app_id: AppId, html: &str) -> Metadata {
    let document = Html::parse_document(html);
    Metadata {
        app_id,
        game_name: extract_name(&document),
        franchise: extract_franchise(&document),
    }
}

/// Text of the first `apphub_AppName` block.
pub fn extract_name(document: &Html) -> Option<String> {
    first_text(document, &NAME_SELECTOR)
}

/// Franchise named by the first `franchise_name` block, if its banner matches.
pub fn extract_franchise(document: &Html) -> Option<String> {
    let text = first_text(document, &FRANCHISE_SELECTOR)?;
    FRANCHISE_RE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whitespace-collapsed text of the first element matching `selector`.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    let element = document.select(selector).next()?;
    let text: String = element.text().collect();
    Some(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStorePage;

    fn app(id: i64) -> AppId {
        AppId::new(id).unwrap()
    }

    const HYLICS_PAGE: &str = r#"
        <html><body>
          <div class="apphub_HomeHeaderContent">
            <div class="apphub_AppName" id="appHubAppName">Hylics</div>
          </div>
        </body></html>"#;

    const HIGURASHI_PAGE: &str = r#"
        <html><body>
          <div id="appHubAppName" class="apphub_AppName">Higurashi When They Cry Hou - Ch.1 Onikakushi</div>
          <div class="franchise_notice">
            <div class="franchise_name">
              <a href="https://store.steampowered.com/franchise/WhenTheyCry">Check out the entire
                When They Cry Franchise on Steam</a>
            </div>
          </div>
        </body></html>"#;

    #[test]
    fn name_is_read_from_app_name_block() {
        let meta = extract_metadata(app(397740), HYLICS_PAGE);
        assert_eq!(meta.game_name.as_deref(), Some("Hylics"));
        assert_eq!(meta.franchise, None);
    }

    #[test]
    fn franchise_is_captured_across_nested_markup() {
        let meta = extract_metadata(app(406550), HIGURASHI_PAGE);
        assert_eq!(meta.franchise.as_deref(), Some("When They Cry"));
    }

    #[test]
    fn franchise_banner_with_capitalized_words() {
        let html = r#"<div class="franchise_name">Check out the Entire Crusader Kings Official franchise on Steam</div>"#;
        let meta = extract_metadata(app(1158310), html);
        assert_eq!(meta.franchise.as_deref(), Some("Crusader Kings Official"));
    }

    #[test]
    fn unmatched_franchise_text_is_absent() {
        let html = r#"<div class="franchise_name">Some other banner</div>"#;
        assert_eq!(extract_metadata(app(1), html).franchise, None);
    }

    #[test]
    fn empty_page_yields_no_metadata() {
        let meta = extract_metadata(app(1), "");
        assert_eq!(meta.game_name, None);
        assert_eq!(meta.franchise, None);
    }

    #[test]
    fn only_first_matching_element_counts() {
        let html = r#"
            <div class="apphub_AppName">First</div>
            <div class="apphub_AppName">Second</div>"#;
        assert_eq!(extract_metadata(app(1), html).game_name.as_deref(), Some("First"));
    }

    #[tokio::test]
    async fn set_identifier_replaces_metadata_and_fetches_once() {
        let pages = Arc::new(
            MockStorePage::new()
                .on_app(397740, HYLICS_PAGE)
                .on_app(406550, HIGURASHI_PAGE),
        );
        let mut lookup = MetadataLookup::new(pages.clone());
        assert!(lookup.current().is_none());

        lookup.set_identifier(app(397740)).await.unwrap();
        assert_eq!(lookup.current().unwrap().game_name.as_deref(), Some("Hylics"));

        let meta = lookup.set_identifier(app(406550)).await.unwrap();
        assert_eq!(meta.app_id, app(406550));
        assert_eq!(meta.franchise.as_deref(), Some("When They Cry"));
        assert_eq!(pages.fetch_count(app(397740)), 1);
        assert_eq!(pages.fetch_count(app(406550)), 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_metadata() {
        let pages = Arc::new(MockStorePage::new().on_app(397740, HYLICS_PAGE));
        let mut lookup = MetadataLookup::new(pages);
        lookup.set_identifier(app(397740)).await.unwrap();

        assert!(lookup.set_identifier(app(5)).await.is_err());
        assert_eq!(lookup.current().unwrap().app_id, app(397740));
    }
}
