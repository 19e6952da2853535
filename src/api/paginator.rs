//! Cursor-based pagination over a channel's message history
//!
//! Pages arrive newest-first. The cursor for the next page is always the id
//! of the last (oldest) message of the previous batch, passed as the
//! `before` query parameter. A channel's crawl ends on the first empty page,
//! or when a page keeps failing past the configured retry budget, in which
//! case the history is truncated at the last successfully fetched message.

use crate::api::client::RestClient;
use crate::model::{Channel, Message};
use crate::ApiError;

/// Query parameters for one message page
#[derive(Debug, Clone)]
pub struct BatchQuery {
    /// Messages per page (1..=100)
    pub limit: u32,
    /// Only return messages with ids strictly below this snowflake
    pub before: Option<String>,
}

impl BatchQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            before: None,
        }
    }

    /// Starts pagination from an explicit cursor instead of the newest message
    pub fn starting_before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string())];
        if let Some(before) = &self.before {
            query.push(("before", before.clone()));
        }
        query
    }
}

/// Tagged result of one page attempt
///
/// Distinguishes the natural end of history from a failed request, so the
/// pagination loop can retry failures instead of mistaking them for
/// completion.
#[derive(Debug)]
pub enum BatchOutcome {
    /// A non-empty page of messages, newest-first
    Batch(Vec<Message>),
    /// An empty page: the channel's history is exhausted
    End,
    /// The request or its decoding failed
    Failed(ApiError),
}

/// Everything fetched for one channel
#[derive(Debug)]
pub struct ChannelHistory {
    /// All fetched messages, newest-first overall
    pub messages: Vec<Message>,
    /// False when the crawl was truncated by a failing page
    pub complete: bool,
}

/// Requests one page of messages for a channel
///
/// The request counter advances once per attempt regardless of outcome; a
/// failure has already been counted and logged by the client.
pub async fn fetch_message_batch(
    client: &RestClient,
    channel_id: &str,
    query: &BatchQuery,
) -> BatchOutcome {
    let path = format!("/channels/{}/messages", channel_id);
    match client.get_json::<Vec<Message>>(&path, &query.to_query()).await {
        Ok(messages) if messages.is_empty() => BatchOutcome::End,
        Ok(messages) => BatchOutcome::Batch(messages),
        Err(e) => BatchOutcome::Failed(e),
    }
}

/// Fetches the complete message history of a channel
///
/// Walks pages backward from the newest message (or from the cursor carried
/// by `initial`) until an empty page signals the end of history. Each failed
/// page is retried up to `max_page_retries` times with the same cursor; once
/// the budget is spent the crawl stops and the history is marked incomplete.
/// With the default budget of 0 a single failure truncates the crawl, which
/// matches the historical behavior.
///
/// # Arguments
///
/// * `client` - The API client
/// * `channel` - The channel to crawl
/// * `initial` - Query for the first page (page size, optional start cursor)
/// * `max_page_retries` - Extra attempts per page before truncating
pub async fn fetch_all_messages(
    client: &RestClient,
    channel: &Channel,
    initial: BatchQuery,
    max_page_retries: u32,
) -> ChannelHistory {
    tracing::info!("Fetching messages for {} ({})", channel.name, channel.id);

    let mut messages: Vec<Message> = Vec::new();
    let mut query = initial;
    let mut complete = true;

    'pages: loop {
        let mut attempts: u32 = 0;
        let batch = loop {
            match fetch_message_batch(client, &channel.id, &query).await {
                BatchOutcome::Batch(batch) => break batch,
                BatchOutcome::End => break 'pages,
                BatchOutcome::Failed(e) => {
                    if attempts < max_page_retries {
                        attempts += 1;
                        tracing::warn!(
                            "Page fetch for {} failed ({}), retry {}/{}",
                            channel.id,
                            e,
                            attempts,
                            max_page_retries
                        );
                    } else {
                        tracing::warn!(
                            "Truncating history of {} after failed page: {}",
                            channel.id,
                            e
                        );
                        complete = false;
                        break 'pages;
                    }
                }
            }
        };

        // An empty page is reported as End, so the batch has a last element
        let Some(oldest) = batch.last() else {
            break;
        };
        tracing::debug!(
            "Fetched {} messages starting from {}",
            batch.len(),
            oldest.timestamp
        );
        query.before = Some(oldest.id.clone());
        messages.extend(batch);
    }

    tracing::info!(
        "Finished fetching {} messages for {}",
        messages.len(),
        channel.name
    );

    ChannelHistory { messages, complete }
}
