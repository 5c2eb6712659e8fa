//! Export orchestration
//!
//! - [`orchestrator`] - Bounded parallel fetching across asset types
//! - [`summary`] - Per-asset-type reporting and exit code mapping

pub mod orchestrator;
pub mod summary;

pub use orchestrator::{AssetTypeOutcome, FailedFetch, FetchedAssets, Orchestrator};
pub use summary::{AssetTypeReport, ExportSummary, ReportStatus};
