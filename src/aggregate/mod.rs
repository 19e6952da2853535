//! Message reduction, genesis filtering, and per-author aggregation

use crate::model::{Message, ReducedMessage, UserStats};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Counts words by splitting on single space characters
///
/// This deliberately reproduces the tokenization of the historical dumps:
/// consecutive spaces and newlines each contribute an extra token, and an
/// empty content string still counts as one word. Changing the rule would
/// make new statistics incomparable with the old ones.
pub fn word_count(content: &str) -> u64 {
    content.split(' ').count() as u64
}

/// Projects a message down to the attributes carried by the outputs
pub fn reduce_message(message: &Message) -> ReducedMessage {
    ReducedMessage {
        username: message.author.username.clone(),
        bot: message.author.bot,
        timestamp: message.timestamp.clone(),
        content: message.content.clone(),
        word_count: word_count(&message.content),
    }
}

/// True when the message was created strictly before the genesis cutoff
///
/// Messages with unparseable timestamps are excluded rather than guessed at.
pub fn is_genesis_message(message: &ReducedMessage, genesis: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(&message.timestamp) {
        Ok(timestamp) => timestamp.with_timezone(&Utc) < genesis,
        Err(e) => {
            tracing::warn!("Unparseable timestamp '{}': {}", message.timestamp, e);
            false
        }
    }
}

/// Keeps messages before the genesis cutoff, optionally dropping bot authors
pub fn filter_genesis(
    messages: &[ReducedMessage],
    genesis: DateTime<Utc>,
    exclude_bots: bool,
) -> Vec<ReducedMessage> {
    messages
        .iter()
        .filter(|m| is_genesis_message(m, genesis))
        .filter(|m| !(exclude_bots && m.bot))
        .cloned()
        .collect()
}

/// Folds messages into per-author statistics keyed by username
///
/// Each fold step increments the author's message count, adds the message's
/// word count to the running total, and recomputes the average from the two
/// running totals. The average is never carried forward incrementally, so it
/// is consistent with the counts after every step.
pub fn aggregate_user_stats(messages: &[ReducedMessage]) -> BTreeMap<String, UserStats> {
    let mut stats: BTreeMap<String, UserStats> = BTreeMap::new();
    for message in messages {
        stats
            .entry(message.username.clone())
            .or_default()
            .record(message.word_count);
    }
    stats
}
