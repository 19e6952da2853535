//! Output module: JSON and CSV sinks for crawl results
//!
//! Files are written in one shot with no atomic-replace guarantee; a crash
//! mid-write leaves a partial or missing file, and a rerun replaces it.

mod csv_writer;
mod json;

pub use csv_writer::{write_messages_csv, write_stats_csv};
pub use json::{read_messages, write_json};

use thiserror::Error;

/// Errors from writing or reloading output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error on {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// File name of the raw (reduced) message dump
pub const ALL_MESSAGES_JSON: &str = "all-messages.json";
/// File name of the flattened message records
pub const MESSAGES_CSV: &str = "messages.csv";
/// File name of the genesis-filtered message dump
pub const GENESIS_MESSAGES_JSON: &str = "genesis-messages.json";
/// File name of the per-user statistics (JSON)
pub const USER_STATS_JSON: &str = "user-stats.json";
/// File name of the per-user statistics (CSV)
pub const USER_STATS_CSV: &str = "user-stats.csv";
