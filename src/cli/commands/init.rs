//! Init command implementation
//!
//! Writes a commented sample configuration file to get a new setup
//! started.

use clap::Args;
use std::path::Path;

const SAMPLE_CONFIG: &str = r#"# Carta configuration
#
# Values of the form ${VAR} are substituted from the environment at
# load time. Every key can also be overridden with a CARTA_* variable,
# e.g. CARTA_EXPORT_OUTPUT_FORMAT=json.

[application]
log_level = "info"

[catalog]
instance_url = "https://your-instance.catalog.example.com"
client_id = "your-client-id"
client_secret = "${CARTA_CLIENT_SECRET}"
# timeout_seconds = 30
# token_safety_margin_seconds = 30

# [catalog.retry]
# max_attempts = 3
# retry_delay_ms = 500

[export]
asset_types = [
    { id = "00000000-0000-0000-0000-000000000001", name = "Table" },
    { id = "00000000-0000-0000-0000-000000000002", name = "Column" },
]
# page_size = 500
# concurrency = 5
# output_format = "csv"   # csv, json, or excel
# output_dir = "exports"

[logging]
# local_enabled = true
# local_path = "logs"
# local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let path = Path::new(config_path);

        if path.exists() && !self.force {
            eprintln!(
                "Configuration file {} already exists. Use --force to overwrite.",
                path.display()
            );
            return Ok(2);
        }

        std::fs::write(path, SAMPLE_CONFIG)?;

        println!("✅ Wrote sample configuration to {}", path.display());
        println!("   Edit the catalog section, then run: carta validate-config");
        Ok(0)
    }
}
