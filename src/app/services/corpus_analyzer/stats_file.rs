//! Statistics JSON file
//!
//! The file holds a single top-level array. Every append reads the whole
//! document, pushes one record and rewrites it with 4-space indentation.

use crate::app::models::StatsRecord;
use crate::constants::STATS_JSON_INDENT;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Append one record to the array stored at `path`
///
/// A missing, empty or unparsable file starts a new array; a document that
/// is not an array is replaced by one.
pub fn append_stats_record(path: &Path, record: &StatsRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("Failed to create {}", parent.display()), e))?;
        }
    }

    let mut records = read_array(path)?;
    let value = serde_json::to_value(record)
        .map_err(|e| Error::json("Failed to serialize stats record", e))?;
    records.push(value);

    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(STATS_JSON_INDENT));
    Value::Array(records)
        .serialize(&mut serializer)
        .map_err(|e| Error::json("Failed to format stats file", e))?;

    fs::write(path, buffer)
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    debug!("Stats record for {} saved in {}", record.directory_path, path.display());
    Ok(())
}

/// Records currently stored in a stats file
pub fn read_stats_records(path: &Path) -> Result<Vec<StatsRecord>> {
    read_array(path)?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| Error::json(format!("Invalid stats record in {}", path.display()), e))
        })
        .collect()
}

fn read_array(path: &Path) -> Result<Vec<Value>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::io(format!("Failed to read {}", path.display()), e));
        }
    };

    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    match serde_json::from_slice::<Value>(&content) {
        Ok(Value::Array(values)) => Ok(values),
        Ok(_) => {
            warn!("{} does not hold an array, starting a new one", path.display());
            Ok(Vec::new())
        }
        Err(e) => {
            warn!("{} is not valid JSON ({}), starting a new array", path.display(), e);
            Ok(Vec::new())
        }
    }
}
