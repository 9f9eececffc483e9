// src/config.rs
use crate::constants::RESPONSE_CACHE_TTL_SECS;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use clap::Parser;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page/board URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Bypass the response cache and fetch fresh data
    #[arg(short = 'f', long, default_value_t = false)]
    pub force_refresh: bool,

    /// Response cache TTL in seconds
    #[arg(long, default_value_t = RESPONSE_CACHE_TTL_SECS)]
    pub cache_ttl: u64,

    /// Pretty-print the JSON output
    #[arg(short = 'p', long, default_value_t = false)]
    pub pretty: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved feed configuration — validated and ready to drive a pipeline.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub root: NotionId,
    pub api_key: ApiKey,
    pub force_refresh: bool,
    pub cache_ttl: u64,
    pub pretty: bool,
    pub verbose: bool,
}

impl FeedConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        let api_key = ApiKey::new(api_key_str)?;
        let root = NotionId::parse(&cli.notion_input)?;

        Ok(FeedConfig {
            root,
            api_key,
            force_refresh: cli.force_refresh,
            cache_ttl: cli.cache_ttl,
            pretty: cli.pretty,
            verbose: cli.verbose,
        })
    }
}
