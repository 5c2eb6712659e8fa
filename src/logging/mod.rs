//! Logging and observability
//!
//! Structured logging built on `tracing`, with console output always on
//! and optional rotating JSON file output.
//!
//! # Example
//!
//! ```no_run
//! use carta::logging::init_logging;
//! use carta::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
