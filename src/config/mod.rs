//! Configuration module for Guild-Scribe
//!
//! Handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use guild_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Archiving guild: {}", config.guild.id);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{load_config, TOKEN_ENV_VAR};
pub use types::{ApiConfig, ChannelFilter, Config, GuildConfig, OutputConfig};
