//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path, "Validating configuration");

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                println!("  Instance: {}", config.catalog.instance_url);
                println!("  Asset types: {}", config.export.asset_types.len());
                for asset_type in &config.export.asset_types {
                    match &asset_type.name {
                        Some(name) => println!("    - {} ({})", name, asset_type.id),
                        None => println!("    - {}", asset_type.id),
                    }
                }
                println!("  Output format: {}", config.export.output_format);
                println!("  Output directory: {}", config.export.output_dir);
                println!("  Page size: {}", config.export.page_size);
                println!("  Concurrency: {}", config.export.concurrency);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration validation failed");
                eprintln!("❌ {e}");
                Ok(2)
            }
        }
    }
}
