pub mod assembler;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod normalizer;
pub mod output;
pub mod pagination;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod types;

pub use config::Config;
pub use crawler::{CrawlOutput, CrawlRequest, Crawler};
pub use error::{CrawlError, Result};
pub use types::{AppId, Metadata, NormalizedReview};
