//! REST API client module
//!
//! This module contains the crawl engine, including:
//! - A rate-limited, authenticated HTTP client
//! - Channel and thread enumeration for a guild
//! - Cursor-based pagination over a channel's full message history
//! - Per-run request/error counters

mod channels;
mod client;
mod counters;
mod paginator;

pub use channels::{get_channel, list_channel_threads, list_guild_channels, list_guild_channels_and_threads};
pub use client::{rate_limit_delay, RestClient};
pub use counters::{CounterSnapshot, RunCounters};
pub use paginator::{fetch_all_messages, fetch_message_batch, BatchOutcome, BatchQuery, ChannelHistory};
