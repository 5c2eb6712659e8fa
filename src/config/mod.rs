//! Configuration management for Carta.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Carta uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CARTA_*` environment variable overrides
//! - Default values for optional settings
//! - Validation before any network call is made
//!
//! # Example Configuration
//!
//! ```toml
//! [catalog]
//! instance_url = "https://acme.catalog.example.com"
//! client_id = "carta-client"
//! client_secret = "${CARTA_CLIENT_SECRET}"
//!
//! [export]
//! asset_types = [
//!     { id = "00000000-0000-0000-0000-000000000001", name = "Table" },
//!     { id = "00000000-0000-0000-0000-000000000002", name = "Column" },
//! ]
//! page_size = 500
//! concurrency = 5
//! output_format = "csv"
//! output_dir = "exports"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use carta::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("carta.toml")?;
//! println!("Instance: {}", config.catalog.instance_url);
//! println!("Asset types: {}", config.export.asset_types.len());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AssetTypeConfig, CartaConfig, CatalogConfig, ExportConfig, LoggingConfig,
    OutputFormat, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
