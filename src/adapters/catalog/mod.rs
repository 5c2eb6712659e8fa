//! Governance catalog integration
//!
//! This adapter speaks to two endpoints of the catalog instance: the
//! OAuth token endpoint (client-credentials grant) and the GraphQL
//! endpoint serving paginated asset pages.
//!
//! - [`auth`] - OAuth token lifecycle ([`TokenProvider`])
//! - [`query`] - GraphQL query construction
//! - [`client`] - Paginated asset fetching ([`CatalogClient`])
//! - [`models`] - Wire types for the response envelope

pub mod auth;
pub mod client;
pub mod models;
pub mod query;

pub use auth::TokenProvider;
pub use client::{AssetSource, CatalogClient, FetchFailure};
pub use query::{build_assets_query, QueryPayload};
