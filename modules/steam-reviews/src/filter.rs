use chrono::NaiveDate;
use tracing::warn;

use crate::error::{CrawlError, Result};

const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` filter bound.
pub fn parse_filter_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), FILTER_DATE_FORMAT)
        .map_err(|_| CrawlError::InvalidDateFormat(raw.to_string()))
}

/// Parse an optional filter bound. A bad format is logged and treated as unset.
pub fn parse_optional_filter(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match parse_filter_date(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(error = %e, "Ignoring date filter");
            None
        }
    }
}

/// Inclusive date range applied to normalized reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Fill in missing bounds. Returns `None` when no filtering was asked for.
    ///
    /// `today` stands in for a missing upper bound and is fixed for the whole
    /// crawl.
    pub fn resolve(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Option<Self> {
        if from.is_none() && to.is_none() {
            return None;
        }
        Some(Self {
            from: from.unwrap_or(NaiveDate::MIN),
            to: to.unwrap_or(today),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_filter_date("2024-02-29").unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn rejects_other_formats() {
        for raw in ["2024/02/29", "29-02-2024", "20240229", "2023-02-29", "yesterday"] {
            assert!(
                matches!(parse_filter_date(raw), Err(CrawlError::InvalidDateFormat(s)) if s == raw),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn bad_optional_filter_is_dropped() {
        assert_eq!(parse_optional_filter(Some("01/02/2024")), None);
        assert_eq!(parse_optional_filter(Some("")), None);
        assert_eq!(parse_optional_filter(None), None);
        assert_eq!(parse_optional_filter(Some("2024-01-02")), Some(d(2024, 1, 2)));
    }

    #[test]
    fn no_bounds_means_no_window() {
        assert_eq!(DateWindow::resolve(None, None, d(2025, 1, 1)), None);
    }

    #[test]
    fn missing_bounds_take_defaults() {
        let today = d(2025, 6, 1);
        let only_from = DateWindow::resolve(Some(d(2024, 1, 1)), None, today).unwrap();
        assert_eq!(only_from.to, today);

        let only_to = DateWindow::resolve(None, Some(d(2024, 1, 1)), today).unwrap();
        assert_eq!(only_to.from, NaiveDate::MIN);
        assert!(only_to.contains(d(1970, 1, 1)));
    }

    #[test]
    fn window_is_inclusive() {
        let w = DateWindow::resolve(Some(d(2024, 1, 1)), Some(d(2024, 1, 31)), d(2025, 1, 1)).unwrap();
        assert!(w.contains(d(2024, 1, 1)));
        assert!(w.contains(d(2024, 1, 31)));
        assert!(!w.contains(d(2023, 12, 31)));
        assert!(!w.contains(d(2024, 2, 1)));
    }
}
