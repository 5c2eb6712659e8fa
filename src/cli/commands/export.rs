//! Export command implementation
//!
//! Runs the full pipeline: fetch every configured asset type through
//! the orchestrator, flatten each successful record set, and hand the
//! tables to the configured writer. Failed asset types are reported but
//! never stop the others; their outcome decides the exit code.

use crate::adapters::catalog::CatalogClient;
use crate::adapters::output::write_table;
use crate::config::{load_config, AssetTypeConfig};
use crate::core::export::{AssetTypeReport, ExportSummary, Orchestrator, ReportStatus};
use crate::core::transform::flatten_assets;
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override asset type id(s) to export (comma-separated UUIDs)
    #[arg(long)]
    pub asset_type: Option<String>,

    /// Override output format (csv, json, excel)
    #[arg(long)]
    pub format: Option<String>,

    /// Override output directory
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(asset_types) = &self.asset_type {
            let overrides: Vec<AssetTypeConfig> = asset_types
                .split(',')
                .map(|s| AssetTypeConfig {
                    id: s.trim().to_string(),
                    name: None,
                })
                .collect();
            tracing::info!(count = overrides.len(), "Overriding asset types from CLI");
            config.export.asset_types = overrides;
        }

        if let Some(format) = &self.format {
            match format.parse() {
                Ok(format) => config.export.output_format = format,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            }
        }

        if let Some(output_dir) = &self.output_dir {
            config.export.output_dir = output_dir.clone();
        }

        // Validate after overrides
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let started = Instant::now();

        let client = match CatalogClient::new(&config.catalog, config.export.page_size) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create catalog client");
                eprintln!("Failed to create catalog client: {e}");
                return Ok(2);
            }
        };

        let orchestrator = Orchestrator::new(
            Arc::new(client),
            config.export.concurrency,
            shutdown_signal,
        );

        let requests = config.export.requests();

        println!(
            "🚀 Exporting {} asset type(s) from {} as {}...",
            requests.len(),
            config.catalog.instance_url,
            config.export.output_format
        );
        println!();

        let outcomes = orchestrator.run(requests).await;

        // Flatten and write every successful asset type; failures only
        // affect their own report
        let output_dir = Path::new(&config.export.output_dir);
        let mut summary = ExportSummary::new();

        for outcome in outcomes {
            let name = outcome.request.effective_name().to_string();
            let id = outcome.request.id.clone();

            let report = match outcome.result {
                Ok(fetched) => {
                    let record_count = fetched.records.len();
                    match flatten_assets(&fetched.records).and_then(|table| {
                        write_table(config.export.output_format, output_dir, &name, &table)
                    }) {
                        Ok(artifact) => AssetTypeReport::succeeded(
                            &name,
                            &id,
                            record_count,
                            artifact,
                            fetched.duration,
                        ),
                        Err(e) => {
                            tracing::error!(
                                asset_type = %name,
                                error = %e,
                                "Failed to transform or write asset type"
                            );
                            AssetTypeReport::failed(
                                &name,
                                &id,
                                e.to_string(),
                                record_count,
                                false,
                                fetched.duration,
                            )
                        }
                    }
                }
                Err(failed) => AssetTypeReport::failed(
                    &name,
                    &id,
                    failed.error.to_string(),
                    failed.partial.len(),
                    failed.error.is_cancelled(),
                    failed.duration,
                ),
            };

            summary.add(report);
        }

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();

        // Display summary
        println!();
        println!("📊 Export Summary:");
        for report in &summary.reports {
            match &report.status {
                ReportStatus::Succeeded { records, artifact } => {
                    println!(
                        "  {} -> {} ({} records, {:.2}s)",
                        report.name,
                        artifact.display(),
                        records,
                        report.duration.as_secs_f64()
                    );
                }
                ReportStatus::Failed {
                    message,
                    partial_records,
                    cancelled,
                } => {
                    let reason = if *cancelled { "CANCELLED" } else { "FAILED" };
                    println!("  {} {}: {}", report.name, reason, message);
                    if *partial_records > 0 {
                        println!("    ({partial_records} records fetched before the failure)");
                    }
                }
            }
        }
        println!();
        println!("  Total records: {}", summary.total_records());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if summary.interrupted() {
            println!("⚠️  Export interrupted. Re-run to export the affected asset types again.");
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
        } else {
            println!(
                "⚠️  Export completed with {} failed asset type(s)",
                summary.failed_count()
            );
        }

        Ok(summary.exit_code())
    }
}
