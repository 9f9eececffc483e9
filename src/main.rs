// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use notion2feed::{
    AppError, CachedBlockSource, CommandLineInput, FeedConfig, FeedPipeline, NotionHttpClient,
};
use std::time::Duration;

/// Sets up console logging.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

/// Loads the root board and prints the feed and discovered boards as JSON.
async fn run(config: &FeedConfig) -> Result<(), AppError> {
    let client = NotionHttpClient::new(config.api_key.clone());
    let source = CachedBlockSource::new(client, Duration::from_secs(config.cache_ttl));
    let pipeline = FeedPipeline::new(source);

    let feed = pipeline
        .load_board(config.root.as_str(), config.force_refresh)
        .await?;
    let boards = pipeline.boards();

    let output = serde_json::json!({
        "boards": boards,
        "feed": feed,
    });
    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    log::debug!("loaded {} boards, {} feed entries", boards.len(), feed.len());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let config = match FeedConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&config).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
