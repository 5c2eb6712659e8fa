//! CSV writer

use crate::domain::{FlatTable, Result};
use std::path::Path;

/// Write a flattened table as CSV with a header row
///
/// Cells follow the table's column order; rows without a value for a
/// column emit an empty cell.
pub fn write_csv(path: &Path, table: &FlatTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.columns)?;

    for row in &table.rows {
        let record: Vec<&str> = table
            .columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(record)?;
    }

    writer.flush()?;
    Ok(())
}
