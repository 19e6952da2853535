//! Data model for channels, messages, and aggregated statistics

mod channel;
mod message;
mod stats;

pub use channel::{Channel, ChannelKind, ThreadList};
pub use message::{Author, Message, ReducedMessage};
pub use stats::UserStats;
