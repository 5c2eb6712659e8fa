//! Asset domain models
//!
//! Typed representations of the catalog's GraphQL asset shape. Every
//! variable-cardinality sub-list (`attributes`, `relations`,
//! `responsibilities`) defaults to empty when the API omits it, so page
//! parsing never falls back to untyped JSON traversal.

use serde::{Deserialize, Serialize};

/// One unit of export work, created from configuration at run start
///
/// The optional display name is used for output file naming; it falls
/// back to the raw asset-type id when not configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTypeRequest {
    /// Asset-type identifier (a UUID in the catalog)
    pub id: String,

    /// Human-readable name for output files and logs
    pub display_name: Option<String>,
}

impl AssetTypeRequest {
    /// Create a request with no display name
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    /// Create a request with a display name
    pub fn with_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(name.into()),
        }
    }

    /// The name used for output files and summary lines
    pub fn effective_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// A fully-populated asset as returned by one page of the assets query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssetRecord {
    pub id: String,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub created_on: Option<String>,

    #[serde(default)]
    pub modified_on: Option<String>,

    #[serde(default)]
    pub created_by: Option<UserRef>,

    #[serde(default)]
    pub modified_by: Option<UserRef>,

    #[serde(default)]
    pub status: Option<NamedRef>,

    #[serde(rename = "type", default)]
    pub asset_type: Option<NamedRef>,

    #[serde(default)]
    pub domain: Option<DomainRef>,

    #[serde(default)]
    pub string_attributes: Vec<StringAttribute>,

    #[serde(default)]
    pub multi_value_attributes: Vec<MultiValueAttribute>,

    #[serde(default)]
    pub numeric_attributes: Vec<NumericAttribute>,

    #[serde(default)]
    pub date_attributes: Vec<DateAttribute>,

    #[serde(default)]
    pub boolean_attributes: Vec<BooleanAttribute>,

    #[serde(default)]
    pub outgoing_relations: Vec<OutgoingRelation>,

    #[serde(default)]
    pub incoming_relations: Vec<IncomingRelation>,

    #[serde(default)]
    pub responsibilities: Vec<Responsibility>,
}

/// A reference carrying only a name (status, type, attribute type, role)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// A user reference on responsibilities and audit fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

/// The domain an asset lives in, with its parent community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRef {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub parent: Option<NamedRef>,
}

/// Single-valued text attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringAttribute {
    #[serde(rename = "type")]
    pub attribute_type: NamedRef,

    #[serde(default)]
    pub string_value: Option<String>,
}

/// Multi-valued text attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiValueAttribute {
    #[serde(rename = "type")]
    pub attribute_type: NamedRef,

    #[serde(default)]
    pub string_values: Vec<String>,
}

/// Numeric attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericAttribute {
    #[serde(rename = "type")]
    pub attribute_type: NamedRef,

    #[serde(default)]
    pub numeric_value: Option<f64>,
}

/// Date attribute
///
/// The catalog serves dates either as epoch milliseconds or as an ISO
/// string depending on the attribute definition, so both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateAttribute {
    #[serde(rename = "type")]
    pub attribute_type: NamedRef,

    #[serde(default)]
    pub date_value: Option<DateValue>,
}

/// Epoch-milliseconds or ISO-8601 text date value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Epoch(i64),
    Text(String),
}

/// Boolean attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanAttribute {
    #[serde(rename = "type")]
    pub attribute_type: NamedRef,

    #[serde(default)]
    pub boolean_value: Option<bool>,
}

/// The role half of an outgoing relation type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRole {
    #[serde(default)]
    pub role: Option<String>,
}

/// The co-role half of an incoming relation type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationCorole {
    #[serde(default)]
    pub corole: Option<String>,
}

/// The asset on the far end of a relation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(rename = "type", default)]
    pub asset_type: Option<NamedRef>,
}

impl AssetRef {
    /// Best available label for the related asset
    pub fn label(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.full_name.as_deref())
            .or(self.id.as_deref())
    }
}

/// Directed relation from this asset to a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingRelation {
    #[serde(rename = "type")]
    pub relation_type: RelationRole,

    #[serde(default)]
    pub target: Option<AssetRef>,
}

/// Directed relation from a source to this asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingRelation {
    #[serde(rename = "type")]
    pub relation_type: RelationCorole,

    #[serde(default)]
    pub source: Option<AssetRef>,
}

/// A role (owner, steward) assigned to a user for this asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Responsibility {
    #[serde(default)]
    pub role: Option<NamedRef>,

    #[serde(default)]
    pub user: Option<UserRef>,
}
