use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use steam_reviews::cli::Cli;
use steam_reviews::output::to_pretty_json;
use steam_reviews::{Config, Crawler};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for --no-json output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("steam_reviews=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = &cli.out_dir {
        config.out_dir = dir.clone();
    }
    config.log_redacted();

    let mut crawler = Crawler::from_config(&config)?;
    let output = crawler.crawl(cli.to_request()).await?;

    if cli.no_json {
        println!("{}", to_pretty_json(&output.reviews)?);
    }

    info!(app_id = output.app_id.get(), reviews = output.reviews.len(), "Done");
    Ok(())
}
