//! Domain models and types for Carta.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Asset models** ([`RawAssetRecord`] and its typed attribute, relation,
//!   and responsibility entries)
//! - **Work units** ([`AssetTypeRequest`])
//! - **Error types** ([`CartaError`], [`CatalogError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use carta::domain::{CartaError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(CartaError::Configuration("missing client id".to_string()))
//! }
//! ```

pub mod asset;
pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use asset::{
    AssetRef, AssetTypeRequest, BooleanAttribute, DateAttribute, DateValue, DomainRef,
    IncomingRelation, MultiValueAttribute, NamedRef, NumericAttribute, OutgoingRelation,
    RawAssetRecord, Responsibility, StringAttribute, UserRef,
};
pub use errors::{CartaError, CatalogError};
pub use record::{FlatRecord, FlatTable};
pub use result::Result;
