//! CLI parsing and orchestration. Parses args, runs one scraping operation,
//! prints text or JSON. Maps errors to exit codes.

use crate::config;
use crate::scraper::{ScraperError, StopReason, StoryClient};
use crate::PoliteClient;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::time::Duration;
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Scraper(#[from] ScraperError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scraper(_) => 2,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "wattscrape")]
#[command(about = "Scrape Wattpad: chapter text, part listings, and story search")]
#[command(
    after_help = "Config file keys (user_agent, delay_ms, timeout_secs) are read from ./wattscrape.toml or $XDG_CONFIG_HOME/wattscrape/config.toml. CLI flags override config."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress progress output (errors only).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print verbose error chain.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// HTTP User-Agent (overrides config).
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Delay between requests in milliseconds (overrides config; default 1000).
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read all pages of a chapter. Prints the chapter text; partial results
    /// (a page failed mid-sequence) still succeed, with a note on stderr.
    Read {
        /// Chapter URL (page 1).
        url: String,
    },
    /// List the parts (chapters) of a story from its main page.
    Parts {
        /// Story main-page URL.
        url: String,
    },
    /// Search for stories.
    Search {
        /// Free-text query.
        query: String,
    },
}

fn to_json(value: &impl serde::Serialize) -> Result<String, CliRunError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to serialize JSON: {}", e)))
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;

    const DEFAULT_DELAY_MS: u64 = 1000;
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    let delay_ms = args
        .delay_ms
        .or_else(|| config.as_ref().and_then(|c| c.delay_ms))
        .unwrap_or(DEFAULT_DELAY_MS);
    let timeout_secs = args
        .timeout
        .or_else(|| config.as_ref().and_then(|c| c.timeout_secs))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.user_agent.clone()));

    let mut builder = PoliteClient::builder()
        .delay_ms(delay_ms)
        .timeout_secs(timeout_secs);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let client = builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;
    let mut story_client = StoryClient::with_fetcher(client);

    match &args.command {
        Command::Read { url } => {
            let spinner_state: RefCell<Option<indicatif::ProgressBar>> = RefCell::new(None);
            let progress_cb = |n: u32| {
                let mut state = spinner_state.borrow_mut();
                let spinner = state.get_or_insert_with(|| {
                    let bar = indicatif::ProgressBar::new_spinner();
                    bar.enable_steady_tick(Duration::from_millis(80));
                    bar
                });
                spinner.set_message(format!("Fetching page {}", n));
            };
            let progress: Option<&dyn Fn(u32)> = if args.quiet || args.json {
                None
            } else {
                Some(&progress_cb)
            };

            let outcome = story_client.read_with_progress(url, progress);
            if let Some(spinner) = spinner_state.borrow_mut().take() {
                spinner.finish_and_clear();
            }

            match &outcome.stop {
                StopReason::Failed { page, error } => {
                    eprintln!("Stopped at page {}: {}", page, error);
                }
                StopReason::PageLimit => {
                    eprintln!("Stopped at the {}-page ceiling.", crate::scraper::PAGE_LIMIT);
                }
                StopReason::NoMoreContent { .. } => {}
            }

            if args.json {
                println!("{}", to_json(&outcome.pages)?);
            } else {
                for page in &outcome.pages {
                    println!("{}", page.content);
                }
            }
            if !args.quiet {
                eprintln!("Fetched {} page(s).", outcome.pages.len());
            }
        }
        Command::Parts { url } => {
            let parts = story_client.parts(url)?;
            if args.json {
                println!("{}", to_json(&parts)?);
            } else {
                for part in &parts {
                    println!("{}\t{}", part.title, part.link);
                }
            }
            if !args.quiet {
                eprintln!("Found {} part(s).", parts.len());
            }
        }
        Command::Search { query } => {
            let results = story_client.search(query)?;
            if args.json {
                println!("{}", to_json(&results)?);
            } else {
                for r in &results {
                    println!("{} by {}", r.title, r.author);
                    println!("  {}", r.link);
                    println!(
                        "  reads: {}  votes: {}  parts: {}",
                        r.reads, r.votes, r.parts
                    );
                    if !r.description.is_empty() {
                        println!("  {}", r.description);
                    }
                }
            }
            if !args.quiet {
                eprintln!("Found {} result(s).", results.len());
            }
        }
    }
    Ok(())
}
