//! GraphQL query construction for the assets export
//!
//! One query covers a full page: the asset's scalar fields plus every
//! attribute family, both relation directions, and responsibilities, so
//! no follow-up request per asset is ever needed.

use serde::Serialize;
use serde_json::json;

/// The assets query text
///
/// Filtering, paging, and the page size all arrive through variables so
/// the text itself is a constant.
const ASSETS_QUERY: &str = r#"
query Assets($assetTypeId: UUID!, $cursor: String, $limit: Int!) {
    assets(
        where: { type: { id: { eq: $assetTypeId } } }
        after: $cursor
        limit: $limit
    ) {
        nodes {
            id
            fullName
            displayName
            createdOn
            createdBy {
                fullName
            }
            modifiedOn
            modifiedBy {
                fullName
            }
            status {
                name
            }
            type {
                name
            }
            domain {
                name
                parent {
                    name
                }
            }
            stringAttributes {
                type {
                    name
                }
                stringValue
            }
            multiValueAttributes {
                type {
                    name
                }
                stringValues
            }
            numericAttributes {
                type {
                    name
                }
                numericValue
            }
            dateAttributes {
                type {
                    name
                }
                dateValue
            }
            booleanAttributes {
                type {
                    name
                }
                booleanValue
            }
            outgoingRelations {
                type {
                    role
                }
                target {
                    id
                    fullName
                    displayName
                    type {
                        name
                    }
                }
            }
            incomingRelations {
                type {
                    corole
                }
                source {
                    id
                    fullName
                    displayName
                    type {
                        name
                    }
                }
            }
            responsibilities {
                role {
                    name
                }
                user {
                    fullName
                    email
                }
            }
        }
        pageInfo {
            endCursor
            hasNextPage
        }
    }
}
"#;

/// A ready-to-post GraphQL request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryPayload {
    pub query: String,
    pub variables: serde_json::Value,
}

/// Build the assets query for one page
///
/// Pure function: the same inputs always produce the same payload.
/// `cursor = None` requests the first page.
pub fn build_assets_query(
    asset_type_id: &str,
    cursor: Option<&str>,
    page_size: u32,
) -> QueryPayload {
    QueryPayload {
        query: ASSETS_QUERY.to_string(),
        variables: json!({
            "assetTypeId": asset_type_id,
            "cursor": cursor,
            "limit": page_size,
        }),
    }
}
