//! Flattening transformation
//!
//! Converts nested asset records into flat rows. Each asset becomes
//! exactly one row; multi-valued attributes, relations, and
//! responsibilities are joined into a single delimited cell. Column
//! names are namespaced by category so an attribute and a relation
//! sharing a label can never collide:
//!
//! - `Attribute_<TypeName>`
//! - `Relation_Outgoing_<role>_<TargetTypeName>`
//! - `Relation_Incoming_<corole>_<SourceTypeName>`
//! - `Responsibility_<RoleName>_Name` / `Responsibility_<RoleName>_Email`

use crate::domain::{
    CartaError, DateValue, FlatRecord, FlatTable, RawAssetRecord, Result,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Separator for multi-valued cells
const VALUE_SEPARATOR: &str = "; ";

/// Base columns present for every asset type, in output order
const BASE_COLUMNS: [&str; 11] = [
    "UUID",
    "Full Name",
    "Name",
    "Asset Type",
    "Status",
    "Domain",
    "Community",
    "Created On",
    "Created By",
    "Modified On",
    "Modified By",
];

/// Flatten all records of one asset type into a column-stable table
///
/// The column list is the union across all records: base columns first,
/// then the dynamic attribute/relation/responsibility columns in sorted
/// order. Rows missing a column get an empty cell, so sparse assets
/// never shift columns. The function has no hidden state; flattening
/// the same records twice yields identical tables.
///
/// # Errors
///
/// Returns [`CartaError::Transform`] when a record is malformed (an
/// asset without an id), naming the offending record.
pub fn flatten_assets(records: &[RawAssetRecord]) -> Result<FlatTable> {
    let rows: Vec<FlatRecord> = records
        .iter()
        .map(flatten_record)
        .collect::<Result<Vec<_>>>()?;

    let base: HashSet<&str> = BASE_COLUMNS.iter().copied().collect();
    let dynamic: BTreeSet<String> = rows
        .iter()
        .flat_map(|row| row.keys())
        .filter(|col| !base.contains(col.as_str()))
        .cloned()
        .collect();

    let columns: Vec<String> = BASE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(dynamic)
        .collect();

    // Every row carries every column; absent values become empty cells
    let rows = rows
        .into_iter()
        .map(|mut row| {
            for column in &columns {
                row.entry(column.clone()).or_default();
            }
            row
        })
        .collect();

    Ok(FlatTable { columns, rows })
}

/// Flatten a single asset into one row
fn flatten_record(asset: &RawAssetRecord) -> Result<FlatRecord> {
    if asset.id.trim().is_empty() {
        return Err(CartaError::Transform {
            asset_id: asset
                .display_name
                .clone()
                .or_else(|| asset.full_name.clone())
                .unwrap_or_else(|| "<unknown>".to_string()),
            message: "record is missing its id".to_string(),
        });
    }

    let mut row = FlatRecord::new();
    row.insert("UUID".to_string(), asset.id.clone());

    insert_opt(&mut row, "Full Name", asset.full_name.as_deref());
    insert_opt(&mut row, "Name", asset.display_name.as_deref());
    insert_opt(
        &mut row,
        "Asset Type",
        asset.asset_type.as_ref().and_then(|t| t.name.as_deref()),
    );
    insert_opt(
        &mut row,
        "Status",
        asset.status.as_ref().and_then(|s| s.name.as_deref()),
    );
    insert_opt(
        &mut row,
        "Domain",
        asset.domain.as_ref().and_then(|d| d.name.as_deref()),
    );
    insert_opt(
        &mut row,
        "Community",
        asset
            .domain
            .as_ref()
            .and_then(|d| d.parent.as_ref())
            .and_then(|p| p.name.as_deref()),
    );
    insert_opt(&mut row, "Created On", asset.created_on.as_deref());
    insert_opt(
        &mut row,
        "Created By",
        asset.created_by.as_ref().and_then(|u| u.full_name.as_deref()),
    );
    insert_opt(&mut row, "Modified On", asset.modified_on.as_deref());
    insert_opt(
        &mut row,
        "Modified By",
        asset
            .modified_by
            .as_ref()
            .and_then(|u| u.full_name.as_deref()),
    );

    flatten_attributes(asset, &mut row);
    flatten_relations(asset, &mut row);
    flatten_responsibilities(asset, &mut row);

    Ok(row)
}

fn flatten_attributes(asset: &RawAssetRecord, row: &mut FlatRecord) {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for attr in &asset.string_attributes {
        if let (Some(name), Some(value)) =
            (attr.attribute_type.name.as_deref(), attr.string_value.as_deref())
        {
            values
                .entry(attribute_column(name))
                .or_default()
                .push(value.trim().to_string());
        }
    }

    for attr in &asset.multi_value_attributes {
        if let Some(name) = attr.attribute_type.name.as_deref() {
            values
                .entry(attribute_column(name))
                .or_default()
                .extend(attr.string_values.iter().map(|v| v.trim().to_string()));
        }
    }

    for attr in &asset.numeric_attributes {
        if let (Some(name), Some(value)) =
            (attr.attribute_type.name.as_deref(), attr.numeric_value)
        {
            values
                .entry(attribute_column(name))
                .or_default()
                .push(value.to_string());
        }
    }

    for attr in &asset.date_attributes {
        if let (Some(name), Some(value)) =
            (attr.attribute_type.name.as_deref(), attr.date_value.as_ref())
        {
            values
                .entry(attribute_column(name))
                .or_default()
                .push(render_date(value));
        }
    }

    for attr in &asset.boolean_attributes {
        if let (Some(name), Some(value)) =
            (attr.attribute_type.name.as_deref(), attr.boolean_value)
        {
            values
                .entry(attribute_column(name))
                .or_default()
                .push(value.to_string());
        }
    }

    for (column, entries) in values {
        row.insert(column, join_unique(entries));
    }
}

fn flatten_relations(asset: &RawAssetRecord, row: &mut FlatRecord) {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for relation in &asset.outgoing_relations {
        let Some(target) = relation.target.as_ref() else {
            continue;
        };
        let role = relation.relation_type.role.as_deref().unwrap_or("related to");
        let type_name = target
            .asset_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or("Asset");
        if let Some(label) = target.label() {
            values
                .entry(format!("Relation_Outgoing_{role}_{type_name}"))
                .or_default()
                .push(label.trim().to_string());
        }
    }

    for relation in &asset.incoming_relations {
        let Some(source) = relation.source.as_ref() else {
            continue;
        };
        let corole = relation
            .relation_type
            .corole
            .as_deref()
            .unwrap_or("related to");
        let type_name = source
            .asset_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or("Asset");
        if let Some(label) = source.label() {
            values
                .entry(format!("Relation_Incoming_{corole}_{type_name}"))
                .or_default()
                .push(label.trim().to_string());
        }
    }

    for (column, entries) in values {
        row.insert(column, join_unique(entries));
    }
}

fn flatten_responsibilities(asset: &RawAssetRecord, row: &mut FlatRecord) {
    let mut names: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut emails: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for responsibility in &asset.responsibilities {
        let Some(role) = responsibility
            .role
            .as_ref()
            .and_then(|r| r.name.as_deref())
        else {
            continue;
        };
        let Some(user) = responsibility.user.as_ref() else {
            continue;
        };

        if let Some(name) = user.full_name.as_deref() {
            names
                .entry(format!("Responsibility_{role}_Name"))
                .or_default()
                .push(name.to_string());
        }
        if let Some(email) = user.email.as_deref() {
            emails
                .entry(format!("Responsibility_{role}_Email"))
                .or_default()
                .push(email.to_string());
        }
    }

    for (column, entries) in names.into_iter().chain(emails) {
        row.insert(column, join_unique(entries));
    }
}

fn attribute_column(type_name: &str) -> String {
    format!("Attribute_{type_name}")
}

fn render_date(value: &DateValue) -> String {
    match value {
        DateValue::Epoch(millis) => chrono::DateTime::from_timestamp_millis(*millis)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| millis.to_string()),
        DateValue::Text(text) => text.clone(),
    }
}

fn insert_opt(row: &mut FlatRecord, column: &str, value: Option<&str>) {
    if let Some(value) = value {
        row.insert(column.to_string(), value.to_string());
    }
}

/// Join values with the separator, dropping exact duplicates and empties
fn join_unique(values: Vec<String>) -> String {
    let mut seen = HashSet::new();
    let unique: Vec<String> = values
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect();
    unique.join(VALUE_SEPARATOR)
}
