//! Flattened record types
//!
//! The output side of the pipeline works on flat rows: one mapping from
//! column name to scalar string value per asset, with a shared column
//! list per asset type so every writer emits the same table shape.

use std::collections::BTreeMap;

/// One flattened asset: column name to scalar value
pub type FlatRecord = BTreeMap<String, String>;

/// All flattened records of one asset type with their shared column set
///
/// Every row carries every column; cells for values an asset does not
/// have hold an empty string rather than being absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    /// Column names in output order
    pub columns: Vec<String>,

    /// One row per asset, in fetch order
    pub rows: Vec<FlatRecord>,
}

impl FlatTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }
}
