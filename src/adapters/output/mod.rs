//! Output artifact writers
//!
//! Each asset type produces one artifact in the configured directory,
//! named from its display name. All three writers consume the same
//! flattened table, so the table shape never depends on the format.

pub mod csv;
pub mod excel;
pub mod json;

use crate::config::OutputFormat;
use crate::domain::{CartaError, FlatTable, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write one asset type's table in the requested format
///
/// Creates the output directory if needed and returns the path of the
/// written artifact.
///
/// # Errors
///
/// Returns [`CartaError::Output`] or [`CartaError::Io`] when the
/// directory or file cannot be written.
pub fn write_table(
    format: OutputFormat,
    dir: &Path,
    display_name: &str,
    table: &FlatTable,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        CartaError::Output(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })?;

    let file_name = format!("{}.{}", sanitize_file_name(display_name), format.extension());
    let path = dir.join(file_name);

    match format {
        OutputFormat::Csv => csv::write_csv(&path, table)?,
        OutputFormat::Json => json::write_json(&path, table)?,
        OutputFormat::Excel => excel::write_excel(&path, table)?,
    }

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        format = %format,
        "Wrote output artifact"
    );

    Ok(path)
}

/// Strip characters that are invalid in file names
///
/// Keeps alphanumerics, spaces, underscores, and dashes; everything else
/// is dropped. A name with nothing left becomes "export".
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim().to_string();

    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlatRecord;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case("Business Term", "Business Term"; "plain name")]
    #[test_case("Table / View", "Table  View"; "slash dropped")]
    #[test_case("data::set?", "dataset"; "punctuation dropped")]
    #[test_case("###", "export"; "nothing left")]
    fn test_sanitize_file_name(input: &str, expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }

    #[test]
    fn test_write_table_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("nested").join("exports");

        let mut row = FlatRecord::new();
        row.insert("UUID".to_string(), "a-1".to_string());

        let table = FlatTable {
            columns: vec!["UUID".to_string()],
            rows: vec![row],
        };

        let path = write_table(OutputFormat::Csv, &output_dir, "Business Term", &table).unwrap();

        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "Business Term.csv");
    }
}
