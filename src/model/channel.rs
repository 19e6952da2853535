use serde::Deserialize;

/// Channel type as reported by the API
///
/// The API encodes channel types as small integers. Only the types that
/// influence filtering are named; everything else is carried through as
/// `Other` so unknown types never fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum ChannelKind {
    /// Guild text channel (type 0)
    Text,
    /// Guild voice channel (type 2)
    Voice,
    /// Public thread inside a text channel (type 11)
    PublicThread,
    /// Any other channel type, kept verbatim
    Other(u8),
}

impl From<u8> for ChannelKind {
    fn from(raw: u8) -> Self {
        match raw {
            0 => ChannelKind::Text,
            2 => ChannelKind::Voice,
            11 => ChannelKind::PublicThread,
            other => ChannelKind::Other(other),
        }
    }
}

/// A guild channel or thread
///
/// Immutable once fetched; `id` is a snowflake string, numerically ordered
/// by creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
}

/// Response payload of the thread-listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadList {
    #[serde(default)]
    pub threads: Vec<Channel>,
}
