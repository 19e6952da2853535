use crate::model::{ReducedMessage, UserStats};
use crate::output::OutputError;
use csv::Writer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// CSV record for one per-user statistics row
///
/// Headers stay camelCase to match the historical dump format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsRecord<'a> {
    username: &'a str,
    message_count: u64,
    total_word_count: u64,
    average_word_count: u64,
}

fn open_writer(path: &Path) -> Result<Writer<BufWriter<File>>, OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Writer::from_writer(BufWriter::new(file)))
}

fn csv_error(path: &Path, source: csv::Error) -> OutputError {
    OutputError::Csv {
        path: path.display().to_string(),
        source,
    }
}

/// Writes flattened message records as CSV
pub fn write_messages_csv(path: &Path, messages: &[ReducedMessage]) -> Result<(), OutputError> {
    let mut writer = open_writer(path)?;
    for message in messages {
        writer.serialize(message).map_err(|e| csv_error(path, e))?;
    }
    writer
        .flush()
        .map_err(|source| OutputError::Io {
            path: path.display().to_string(),
            source,
        })?;

    tracing::info!("Wrote {} message records to {}", messages.len(), path.display());
    Ok(())
}

/// Writes per-user statistics rows as CSV, one row per username
pub fn write_stats_csv(
    path: &Path,
    stats: &BTreeMap<String, UserStats>,
) -> Result<(), OutputError> {
    let mut writer = open_writer(path)?;
    for (username, user) in stats {
        let record = StatsRecord {
            username,
            message_count: user.message_count,
            total_word_count: user.total_word_count,
            average_word_count: user.average_word_count,
        };
        writer.serialize(record).map_err(|e| csv_error(path, e))?;
    }
    writer
        .flush()
        .map_err(|source| OutputError::Io {
            path: path.display().to_string(),
            source,
        })?;

    tracing::info!("Wrote {} user stats rows to {}", stats.len(), path.display());
    Ok(())
}
