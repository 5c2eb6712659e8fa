//! Excel writer

use crate::domain::{CartaError, FlatTable, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Write a flattened table as an Excel workbook with one worksheet
///
/// The header row is bold; data rows follow in table order.
pub fn write_excel(path: &Path, table: &FlatTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .map_err(|e| CartaError::Output(e.to_string()))?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col, column) in table.columns.iter().enumerate() {
            let value = row.get(column).map(String::as_str).unwrap_or("");
            if !value.is_empty() {
                worksheet
                    .write_string((row_idx + 1) as u32, col as u16, value)
                    .map_err(|e| CartaError::Output(e.to_string()))?;
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| CartaError::Output(format!("Failed to save {}: {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlatRecord;
    use tempfile::TempDir;

    #[test]
    fn test_write_excel_creates_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.xlsx");

        let mut row = FlatRecord::new();
        row.insert("UUID".to_string(), "a-1".to_string());
        row.insert("Name".to_string(), "Customers".to_string());

        let table = FlatTable {
            columns: vec!["UUID".to_string(), "Name".to_string()],
            rows: vec![row],
        };

        write_excel(&path, &table).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_excel_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");

        let table = FlatTable {
            columns: vec!["UUID".to_string()],
            rows: vec![],
        };

        write_excel(&path, &table).unwrap();
        assert!(path.exists());
    }
}
