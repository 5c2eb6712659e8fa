//! Export summary and reporting
//!
//! Tracks what happened to each asset type over a run and turns that
//! into the process exit code: all fetched (even if empty) is success,
//! any permanent failure makes the run non-zero, an interrupt maps to
//! the conventional SIGINT code.

use std::path::PathBuf;
use std::time::Duration;

/// Final status of one asset type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// Fetched and written, possibly with zero records
    Succeeded {
        records: usize,
        artifact: PathBuf,
    },
    /// Permanently failed; successful asset types are unaffected
    Failed {
        message: String,
        partial_records: usize,
        cancelled: bool,
    },
}

/// Outcome of one asset type in a run
#[derive(Debug, Clone)]
pub struct AssetTypeReport {
    /// Display name used for the output file
    pub name: String,

    /// Asset-type identifier
    pub asset_type_id: String,

    pub status: ReportStatus,

    /// Wall-clock time spent on this asset type
    pub duration: Duration,
}

impl AssetTypeReport {
    /// Report a fetched-and-written asset type
    pub fn succeeded(
        name: impl Into<String>,
        asset_type_id: impl Into<String>,
        records: usize,
        artifact: PathBuf,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            asset_type_id: asset_type_id.into(),
            status: ReportStatus::Succeeded { records, artifact },
            duration,
        }
    }

    /// Report a permanently failed asset type
    pub fn failed(
        name: impl Into<String>,
        asset_type_id: impl Into<String>,
        message: impl Into<String>,
        partial_records: usize,
        cancelled: bool,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            asset_type_id: asset_type_id.into(),
            status: ReportStatus::Failed {
                message: message.into(),
                partial_records,
                cancelled,
            },
            duration,
        }
    }

    /// Whether this asset type succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.status, ReportStatus::Succeeded { .. })
    }

    /// Whether this asset type was stopped by the shutdown signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, ReportStatus::Failed { cancelled: true, .. })
    }
}

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Per-asset-type reports, in configuration order
    pub reports: Vec<AssetTypeReport>,

    /// Duration of the whole run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the run duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an asset type report
    pub fn add(&mut self, report: AssetTypeReport) {
        self.reports.push(report);
    }

    /// Total records across successful asset types
    pub fn total_records(&self) -> usize {
        self.reports
            .iter()
            .filter_map(|r| match &r.status {
                ReportStatus::Succeeded { records, .. } => Some(records),
                ReportStatus::Failed { .. } => None,
            })
            .sum()
    }

    /// Number of failed asset types
    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_success()).count()
    }

    /// Whether every asset type succeeded (zero-record exports included)
    pub fn is_successful(&self) -> bool {
        self.failed_count() == 0
    }

    /// Whether any asset type was stopped by the shutdown signal
    pub fn interrupted(&self) -> bool {
        self.reports.iter().any(AssetTypeReport::is_cancelled)
    }

    /// Process exit code for this run
    ///
    /// 0 when everything succeeded, 1 on any permanent failure,
    /// 130 when the run was interrupted.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted() {
            130
        } else if self.is_successful() {
            0
        } else {
            1
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            asset_types = self.reports.len(),
            total_records = self.total_records(),
            failed = self.failed_count(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        for report in &self.reports {
            match &report.status {
                ReportStatus::Succeeded { records, artifact } => tracing::info!(
                    asset_type = %report.name,
                    records,
                    artifact = %artifact.display(),
                    duration_ms = report.duration.as_millis() as u64,
                    "Asset type exported"
                ),
                ReportStatus::Failed {
                    message,
                    partial_records,
                    cancelled,
                } => tracing::warn!(
                    asset_type = %report.name,
                    error = %message,
                    partial_records,
                    cancelled,
                    "Asset type failed"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(name: &str, records: usize) -> AssetTypeReport {
        AssetTypeReport::succeeded(
            name,
            "00000000-0000-0000-0000-000000000001",
            records,
            PathBuf::from(format!("{name}.csv")),
            Duration::from_secs(1),
        )
    }

    fn failure(name: &str, cancelled: bool) -> AssetTypeReport {
        AssetTypeReport::failed(
            name,
            "00000000-0000-0000-0000-000000000002",
            "Server error: 500",
            3,
            cancelled,
            Duration::from_secs(1),
        )
    }

    #[test]
    fn test_all_success_exits_zero() {
        let mut summary = ExportSummary::new();
        summary.add(success("Table", 100));
        summary.add(success("Column", 0));

        assert!(summary.is_successful());
        assert_eq!(summary.total_records(), 100);
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_zero_record_asset_type_is_success() {
        let mut summary = ExportSummary::new();
        summary.add(success("Table", 0));

        assert!(summary.is_successful());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_any_failure_exits_one() {
        let mut summary = ExportSummary::new();
        summary.add(success("Table", 100));
        summary.add(failure("Column", false));

        assert!(!summary.is_successful());
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.exit_code(), 1);
        // Partial records of a failed asset type are not counted
        assert_eq!(summary.total_records(), 100);
    }

    #[test]
    fn test_cancelled_run_exits_130() {
        let mut summary = ExportSummary::new();
        summary.add(success("Table", 100));
        summary.add(failure("Column", true));

        assert!(summary.interrupted());
        assert_eq!(summary.exit_code(), 130);
    }

    #[test]
    fn test_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(42));
        assert_eq!(summary.duration, Duration::from_secs(42));
    }
}
