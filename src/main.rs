//! Guild-Scribe main entry point
//!
//! Command-line interface for the guild message-history archiver.

use clap::Parser;
use guild_scribe::archiver::{run_archive, RunOptions};
use guild_scribe::config::load_config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Guild-Scribe: a guild message-history archiver
///
/// Guild-Scribe crawls the full message history of a guild's text channels
/// through the paginated REST API, honoring the server's rate limits, and
/// writes raw dumps, a genesis-filtered dump, and per-author statistics as
/// JSON and CSV files.
#[derive(Parser, Debug)]
#[command(name = "guild-scribe")]
#[command(version = "1.0.0")]
#[command(about = "A guild message-history archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Archive a single channel by id instead of the whole guild
    #[arg(long, value_name = "CHANNEL_ID")]
    channel: Option<String>,

    /// Reuse the previous message dump instead of re-crawling
    #[arg(long)]
    skip_fetch: bool,

    /// Validate config and show what would be archived without crawling
    #[arg(long, conflicts_with_all = ["channel", "skip_fetch"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let options = RunOptions {
        channel: cli.channel,
        skip_fetch: cli.skip_fetch,
    };

    tracing::info!("Started fetching message history...");
    // A run that reaches the crawl always completes and writes what it
    // accumulated; failures here are logged, not signaled by exit code.
    match run_archive(config, options).await {
        Ok(summary) => {
            tracing::info!(
                "Archived {} channels, {} messages ({} before genesis, {} users)",
                summary.channels,
                summary.messages,
                summary.genesis_messages,
                summary.users
            );
            if !summary.truncated_channels.is_empty() {
                tracing::warn!(
                    "Output is incomplete for: {}",
                    summary.truncated_channels.join(", ")
                );
            }
        }
        Err(e) => {
            tracing::error!("Fatal error encountered: {}", e);
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("guild_scribe=info,warn"),
            1 => EnvFilter::new("guild_scribe=debug,info"),
            2 => EnvFilter::new("guild_scribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what a run would do
fn handle_dry_run(config: &guild_scribe::config::Config) {
    println!("=== Guild-Scribe Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Page size: {}", config.api.page_size);
    println!("  Max page retries: {}", config.api.max_page_retries);

    println!("\nGuild:");
    println!("  Id: {}", config.guild.id);
    println!("  Genesis date: {}", config.guild.genesis_date);
    println!("  Channel filter: {:?}", config.guild.channel_filter);
    println!("  Include threads: {}", config.guild.include_threads);
    println!(
        "  Concurrent thread discovery: {}",
        config.guild.concurrent_thread_discovery
    );
    println!("  Exclude bots: {}", config.guild.exclude_bots);

    println!("\nOutput:");
    println!("  Data dir: {}", config.output.data_dir);

    println!("\n✓ Configuration is valid");
}
