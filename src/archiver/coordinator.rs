use crate::aggregate::{aggregate_user_stats, filter_genesis, reduce_message};
use crate::api::{
    fetch_all_messages, get_channel, list_guild_channels, list_guild_channels_and_threads,
    BatchQuery, RestClient, RunCounters,
};
use crate::config::Config;
use crate::model::ReducedMessage;
use crate::output::{
    read_messages, write_json, write_messages_csv, write_stats_csv, ALL_MESSAGES_JSON,
    GENESIS_MESSAGES_JSON, MESSAGES_CSV, USER_STATS_CSV, USER_STATS_JSON,
};
use crate::{ConfigError, ScribeError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-invocation options from the command line
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Archive only this channel instead of the whole guild
    pub channel: Option<String>,

    /// Reuse the previous message dump instead of crawling
    pub skip_fetch: bool,
}

/// What one run accomplished
#[derive(Debug)]
pub struct RunSummary {
    /// Channels (and threads) whose history was crawled
    pub channels: usize,

    /// Messages fetched or reloaded
    pub messages: usize,

    /// Messages remaining after the genesis filter
    pub genesis_messages: usize,

    /// Distinct authors in the aggregated statistics
    pub users: usize,

    /// API calls attempted
    pub requests: u64,

    /// API calls that failed
    pub errors: u64,

    /// Channels whose history was truncated by a failing page
    pub truncated_channels: Vec<String>,
}

/// Main archive coordinator
pub struct Archiver {
    config: Config,
    client: RestClient,
    genesis: DateTime<Utc>,
}

impl Archiver {
    /// Creates an archiver with fresh run counters
    pub fn new(config: Config) -> Result<Self, ScribeError> {
        let counters = Arc::new(RunCounters::new());
        let client = RestClient::new(&config.api, counters)?;

        let genesis = DateTime::parse_from_rfc3339(&config.guild.genesis_date)
            .map_err(|e| {
                ConfigError::InvalidGenesisDate(format!("{}: {}", config.guild.genesis_date, e))
            })?
            .with_timezone(&Utc);

        Ok(Self {
            config,
            client,
            genesis,
        })
    }

    /// Runs the archive to completion
    ///
    /// Page-level failures never abort the run; they truncate the affected
    /// channel and show up in the error counter and the summary. Whatever
    /// was accumulated is always written.
    pub async fn run(&self, options: &RunOptions) -> Result<RunSummary, ScribeError> {
        let data_dir = PathBuf::from(&self.config.output.data_dir);
        std::fs::create_dir_all(&data_dir)?;

        let (messages, channels, truncated_channels) = if options.skip_fetch {
            let path = data_dir.join(ALL_MESSAGES_JSON);
            tracing::info!("Skipping fetch, reloading {}", path.display());
            (read_messages(&path)?, 0, Vec::new())
        } else {
            self.crawl(options, &data_dir).await?
        };

        tracing::info!("Aggregating genesis messages");
        let genesis_messages =
            filter_genesis(&messages, self.genesis, self.config.guild.exclude_bots);
        tracing::info!(
            "There were {} messages before the genesis date of {}",
            genesis_messages.len(),
            self.genesis
        );
        write_json(&data_dir.join(GENESIS_MESSAGES_JSON), &genesis_messages)?;

        let stats = aggregate_user_stats(&genesis_messages);
        write_json(&data_dir.join(USER_STATS_JSON), &stats)?;
        write_stats_csv(&data_dir.join(USER_STATS_CSV), &stats)?;

        let counters = self.client.counters();
        tracing::info!(
            "Finished fetching {} messages in {} requests with {} errors",
            messages.len(),
            counters.requests,
            counters.errors
        );

        Ok(RunSummary {
            channels,
            messages: messages.len(),
            genesis_messages: genesis_messages.len(),
            users: stats.len(),
            requests: counters.requests,
            errors: counters.errors,
            truncated_channels,
        })
    }

    /// Crawls message history and writes the raw dumps
    async fn crawl(
        &self,
        options: &RunOptions,
        data_dir: &Path,
    ) -> Result<(Vec<ReducedMessage>, usize, Vec<String>), ScribeError> {
        let guild = &self.config.guild;

        let channels = match &options.channel {
            Some(channel_id) => {
                let channel = get_channel(&self.client, channel_id)
                    .await
                    .map_err(|_| ScribeError::ChannelUnavailable(channel_id.clone()))?;
                vec![channel]
            }
            None if guild.include_threads => {
                list_guild_channels_and_threads(
                    &self.client,
                    &guild.id,
                    guild.channel_filter,
                    guild.concurrent_thread_discovery,
                )
                .await?
            }
            None => list_guild_channels(&self.client, &guild.id, guild.channel_filter).await?,
        };
        tracing::info!("Text channel count: {}", channels.len());

        let mut all_messages: Vec<ReducedMessage> = Vec::new();
        let mut truncated_channels: Vec<String> = Vec::new();

        // Channels are crawled one at a time to bound rate-limit pressure
        for channel in &channels {
            let history = fetch_all_messages(
                &self.client,
                channel,
                BatchQuery::new(self.config.api.page_size),
                self.config.api.max_page_retries,
            )
            .await;

            if !history.complete {
                truncated_channels.push(channel.id.clone());
            }

            all_messages.extend(history.messages.iter().map(reduce_message));
            tracing::info!("Fetched {} messages total", all_messages.len());
        }

        if !truncated_channels.is_empty() {
            tracing::warn!(
                "History truncated for {} channel(s): {}",
                truncated_channels.len(),
                truncated_channels.join(", ")
            );
        }

        write_json(&data_dir.join(ALL_MESSAGES_JSON), &all_messages)?;
        write_messages_csv(&data_dir.join(MESSAGES_CSV), &all_messages)?;

        Ok((all_messages, channels.len(), truncated_channels))
    }
}

/// Runs a complete archive operation
///
/// This is the main entry point used by the CLI.
pub async fn run_archive(config: Config, options: RunOptions) -> Result<RunSummary, ScribeError> {
    let archiver = Archiver::new(config)?;
    archiver.run(&options).await
}
