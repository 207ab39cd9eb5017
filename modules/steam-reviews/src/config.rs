use std::path::PathBuf;
use std::time::Duration;

use steam_client::DEFAULT_STORE_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL serving both `/appreviews` and `/app` pages.
    pub store_url: String,
    pub request_timeout: Duration,
    /// Directory persisted review files are written into.
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            out_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from the process environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let request_timeout = match get("STEAM_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "STEAM_REQUEST_TIMEOUT_SECS is not a positive integer, using default");
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            store_url: get("STEAM_STORE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.store_url),
            request_timeout,
            out_dir: get("STEAM_REVIEWS_OUT_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
        }
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  STEAM_STORE_URL: {}", self.store_url);
        tracing::info!("  STEAM_REQUEST_TIMEOUT_SECS: {}", self.request_timeout.as_secs());
        tracing::info!("  STEAM_REVIEWS_OUT_DIR: {}", self.out_dir.display());
    }
}
