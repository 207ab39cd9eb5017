use std::path::PathBuf;

use clap::Parser;

use crate::crawler::{CrawlRequest, DEFAULT_NUM_REVIEWS};

#[derive(Parser, Debug, Clone)]
#[command(name = "steam-reviews", about = "Crawls for Steam reviews from a given app ID.")]
pub struct Cli {
    /// The chosen Steam app ID
    #[arg(allow_negative_numbers = true)]
    pub appid: i64,

    /// Number of reviews to retrieve
    #[arg(long = "num_reviews", default_value_t = DEFAULT_NUM_REVIEWS)]
    pub num_reviews: i64,

    /// Start filtering from this date
    #[arg(long = "filter_from", visible_alias = "from", value_name = "YYYY-MM-DD")]
    pub filter_from: Option<String>,

    /// Filter up to this date
    #[arg(long = "filter_to", visible_alias = "to", value_name = "YYYY-MM-DD")]
    pub filter_to: Option<String>,

    /// Disable JSON file output; print the reviews to stdout instead
    #[arg(long = "no-json")]
    pub no_json: bool,

    /// Directory for the JSON file (overrides STEAM_REVIEWS_OUT_DIR)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    pub fn to_request(&self) -> CrawlRequest {
        CrawlRequest {
            app_id: Some(self.appid),
            num_reviews: self.num_reviews,
            filter_from: self.filter_from.clone(),
            filter_to: self.filter_to.clone(),
            persist: !self.no_json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["steam-reviews", "220"]).unwrap();
        let request = cli.to_request();
        assert_eq!(request.app_id, Some(220));
        assert_eq!(request.num_reviews, 5000);
        assert!(request.persist);
        assert!(cli.out_dir.is_none());
    }

    #[test]
    fn long_and_short_filter_names() {
        let long = Cli::try_parse_from([
            "steam-reviews",
            "220",
            "--filter_from",
            "2024-01-01",
            "--filter_to",
            "2024-02-01",
        ])
        .unwrap();
        let short = Cli::try_parse_from([
            "steam-reviews",
            "220",
            "--from",
            "2024-01-01",
            "--to",
            "2024-02-01",
        ])
        .unwrap();
        assert_eq!(long.to_request(), short.to_request());
        assert_eq!(short.filter_from.as_deref(), Some("2024-01-01"));
        assert_eq!(short.filter_to.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn no_json_disables_persistence() {
        let cli = Cli::try_parse_from(["steam-reviews", "220", "--no-json", "--num_reviews", "30"])
            .unwrap();
        let request = cli.to_request();
        assert!(!request.persist);
        assert_eq!(request.num_reviews, 30);
    }

    #[test]
    fn negative_app_id_reaches_validation() {
        let cli = Cli::try_parse_from(["steam-reviews", "-4"]).unwrap();
        assert_eq!(cli.appid, -4);
    }

    #[test]
    fn non_numeric_app_id_is_rejected() {
        assert!(Cli::try_parse_from(["steam-reviews", "portal"]).is_err());
    }
}
