//! Wire models for the catalog GraphQL endpoint
//!
//! These types mirror the response envelope of the assets query. Asset
//! records themselves are the domain [`RawAssetRecord`] type; everything
//! here is pagination and error plumbing around them.

use crate::domain::RawAssetRecord;
use serde::Deserialize;

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<AssetsData>,

    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// The `data` object of an assets query response
#[derive(Debug, Deserialize)]
pub struct AssetsData {
    pub assets: AssetConnection,
}

/// One page of assets with its pagination metadata
///
/// `page_info` is optional: older catalog versions return a bare list
/// with no metadata, in which case a short page is the only end signal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetConnection {
    #[serde(default)]
    pub nodes: Vec<RawAssetRecord>,

    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

/// Cursor metadata for one page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,

    #[serde(default)]
    pub has_next_page: bool,
}

/// A GraphQL-level error entry
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}
