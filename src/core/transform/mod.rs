//! Data transformation
//!
//! Converts the nested asset records coming off the fetch pipeline into
//! the flat, column-stable tables the writers consume.

pub mod flatten;

pub use flatten::flatten_assets;
