use serde::Deserialize;

/// Main configuration structure for Guild-Scribe
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub guild: GuildConfig,
    pub output: OutputConfig,
}

/// API access configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bot token; falls back to the DISCORD_TOKEN environment variable
    /// when omitted from the file
    #[serde(default)]
    pub token: Option<String>,

    /// Base URL of the REST API
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Messages requested per page (1..=100)
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Extra attempts per page before truncating a channel crawl.
    /// 0 preserves the historical behavior: one failed page ends the crawl.
    #[serde(rename = "max-page-retries", default)]
    pub max_page_retries: u32,
}

/// Which channel types the enumerator keeps
///
/// The two deployments of the original tool disagreed on this rule, so it is
/// an explicit policy rather than a hard-coded filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelFilter {
    /// Keep everything except voice channels
    ExcludeVoice,
    /// Keep only text channels and public threads
    TextAndThreads,
}

/// Guild selection and filtering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GuildConfig {
    /// Snowflake id of the guild to archive
    pub id: String,

    /// Cutoff timestamp (RFC 3339); only messages strictly before it count
    /// toward the aggregated statistics
    #[serde(rename = "genesis-date")]
    pub genesis_date: String,

    /// Channel-type filter policy
    #[serde(rename = "channel-filter", default = "default_channel_filter")]
    pub channel_filter: ChannelFilter,

    /// Also enumerate each channel's active and archived public threads
    #[serde(rename = "include-threads", default)]
    pub include_threads: bool,

    /// Resolve threads for all channels in parallel instead of one at a time
    #[serde(rename = "concurrent-thread-discovery", default)]
    pub concurrent_thread_discovery: bool,

    /// Drop bot-authored messages before aggregating
    #[serde(rename = "exclude-bots", default = "default_true")]
    pub exclude_bots: bool,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the JSON and CSV files are written to
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

fn default_base_url() -> String {
    "https://discordapp.com/api/v9".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_channel_filter() -> ChannelFilter {
    ChannelFilter::TextAndThreads
}

fn default_true() -> bool {
    true
}
