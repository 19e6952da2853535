use crate::config::parser::TOKEN_ENV_VAR;
use crate::config::types::{ApiConfig, Config, GuildConfig, OutputConfig};
use crate::ConfigError;
use chrono::DateTime;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_guild_config(&config.guild)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API access configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    match &config.token {
        Some(token) if !token.trim().is_empty() => {}
        _ => return Err(ConfigError::MissingToken(TOKEN_ENV_VAR)),
    }

    Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if config.base_url.ends_with('/') {
        return Err(ConfigError::InvalidUrl(
            "base-url must not end with a trailing slash".to_string(),
        ));
    }

    if config.page_size < 1 || config.page_size > 100 {
        return Err(ConfigError::Validation(format!(
            "page-size must be between 1 and 100, got {}",
            config.page_size
        )));
    }

    Ok(())
}

/// Validates guild selection configuration
fn validate_guild_config(config: &GuildConfig) -> Result<(), ConfigError> {
    if config.id.is_empty() || !config.id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::Validation(format!(
            "guild id must be a numeric snowflake, got '{}'",
            config.id
        )));
    }

    DateTime::parse_from_rfc3339(&config.genesis_date)
        .map_err(|e| ConfigError::InvalidGenesisDate(format!("{}: {}", config.genesis_date, e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
