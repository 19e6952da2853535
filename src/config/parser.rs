use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable consulted when the config file carries no token
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

/// Loads and parses a configuration file from the given path
///
/// The token may be supplied either in the `[api]` table or through the
/// `DISCORD_TOKEN` environment variable; the file takes precedence.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    if config.api.token.is_none() {
        config.api.token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
    }

    validate(&config)?;

    Ok(config)
}
