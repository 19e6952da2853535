use serde::{Deserialize, Serialize};

/// Message author as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub username: String,
    /// Absent for human authors, so default to false
    #[serde(default)]
    pub bot: bool,
}

/// A single channel message
///
/// Immutable; identified by `id`, a snowflake string whose numeric value is
/// monotonically decreasing as pagination walks backward in time. Only the
/// fields the archiver consumes are deserialized; the API sends many more.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    /// ISO-8601 creation timestamp, kept as the raw string
    pub timestamp: String,
    pub content: String,
}

/// Projection of a [`Message`] down to the attributes the outputs carry
///
/// Serialized camelCase so the JSON files match the historical dump format,
/// and deserializable so `--skip-fetch` can reload a previous dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducedMessage {
    pub username: String,
    pub bot: bool,
    pub timestamp: String,
    pub content: String,
    pub word_count: u64,
}
