//! Core business logic for Carta.
//!
//! This module contains the fetch orchestration and transformation
//! stages of the export pipeline.
//!
//! # Modules
//!
//! - [`export`] - Parallel orchestration across asset types and run reporting
//! - [`transform`] - Flattening nested assets into column-stable tables
//!
//! # Export Workflow
//!
//! 1. **Fetch**: the orchestrator runs the paginated fetcher across all
//!    configured asset types with bounded concurrency
//! 2. **Transform**: each successful record set is flattened into one
//!    row per asset with a shared column set
//! 3. **Write**: each table is handed to the configured format writer
//! 4. **Report**: a summary maps per-asset-type outcomes to the exit code

pub mod export;
pub mod transform;
