use crate::model::ReducedMessage;
use crate::output::OutputError;
use serde::Serialize;
use std::path::Path;

/// Writes a value as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| OutputError::Json {
        path: path.display().to_string(),
        source,
    })?;

    std::fs::write(path, json).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Reloads a previously written message dump (used by `--skip-fetch`)
pub fn read_messages(path: &Path) -> Result<Vec<ReducedMessage>, OutputError> {
    let content = std::fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| OutputError::Json {
        path: path.display().to_string(),
        source,
    })
}
