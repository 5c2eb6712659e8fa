//! JSON writer

use crate::domain::{CartaError, FlatTable, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a flattened table as a pretty-printed JSON array of objects
///
/// Every object carries the full column set; cells with no value are
/// `null` so consumers see a uniform shape across records.
pub fn write_json(path: &Path, table: &FlatTable) -> Result<()> {
    let records: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for column in &table.columns {
                let value = match row.get(column).map(String::as_str) {
                    Some("") | None => Value::Null,
                    Some(value) => Value::String(value.to_string()),
                };
                object.insert(column.clone(), value);
            }
            Value::Object(object)
        })
        .collect();

    let file = File::create(path)
        .map_err(|e| CartaError::Output(format!("Failed to create {}: {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)?;
    Ok(())
}
