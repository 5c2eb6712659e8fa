// Carta - Governance Catalog Bulk Export Tool
// Copyright (c) 2025 Carta Contributors
// Licensed under the MIT License

//! # Carta - Governance Catalog Bulk Export
//!
//! Carta bulk-exports metadata assets from a governance catalog's
//! GraphQL API into flat files (CSV, JSON, or Excel), driven by a list
//! of asset-type identifiers in a TOML configuration file.
//!
//! ## Overview
//!
//! The pipeline has four stages:
//! - **Authenticate**: a single cached OAuth token (client-credentials
//!   grant) shared by all fetch workers, refreshed on expiry or 401
//! - **Fetch**: cursor-based pagination per asset type, run concurrently
//!   across asset types with bounded parallelism
//! - **Transform**: each nested asset becomes one flat row; column sets
//!   are stable across all rows of an asset type
//! - **Write**: one artifact per asset type in the configured format
//!
//! ## Architecture
//!
//! Carta follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (orchestration, transformation, reporting)
//! - [`adapters`] - External integrations (catalog API, file writers)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carta::adapters::catalog::CatalogClient;
//! use carta::config::load_config;
//! use carta::core::export::Orchestrator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("carta.toml")?;
//!
//!     let client = CatalogClient::new(&config.catalog, config.export.page_size)?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let orchestrator =
//!         Orchestrator::new(Arc::new(client), config.export.concurrency, shutdown_rx);
//!
//!     let outcomes = orchestrator.run(config.export.requests()).await;
//!     for outcome in &outcomes {
//!         println!(
//!             "{}: {}",
//!             outcome.request.effective_name(),
//!             match &outcome.result {
//!                 Ok(fetched) => format!("{} records", fetched.records.len()),
//!                 Err(failed) => format!("failed: {}", failed.error),
//!             }
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! One asset type's permanent failure (authentication rejection, retries
//! exhausted) never aborts the others. The run's exit code reflects the
//! worst outcome: 0 when everything was fetched and written, 1 when any
//! asset type failed, 130 when a shutdown signal interrupted the run.
//!
//! ## Error Handling
//!
//! Carta uses the [`domain::CartaError`] type for all errors:
//!
//! ```rust,no_run
//! use carta::domain::CartaError;
//!
//! fn example() -> Result<(), CartaError> {
//!     let config = carta::config::load_config("carta.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
