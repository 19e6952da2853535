//! Guild-Scribe: a guild message-history archiver
//!
//! This crate crawls the full message history of a chat guild's text channels
//! through the paginated REST API, applies a genesis-date cutoff, aggregates
//! per-author statistics, and writes the results as JSON and CSV files.

pub mod aggregate;
pub mod api;
pub mod archiver;
pub mod config;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for Guild-Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Channel {0} not found or not fetchable")]
    ChannelUnavailable(String),
}

/// Errors from a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid genesis date: {0}")]
    InvalidGenesisDate(String),

    #[error("No API token in config file or {0} environment variable")]
    MissingToken(&'static str),
}
