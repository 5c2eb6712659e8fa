//! Configuration schema types
//!
//! This module defines the configuration structure for Carta. The TOML
//! file maps directly onto [`CartaConfig`]; every section validates
//! itself so a bad value is reported before any network call is made.

use crate::config::SecretString;
use crate::domain::AssetTypeRequest;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;
use uuid::Uuid;

/// Output file format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values, one file per asset type
    Csv,
    /// Pretty-printed JSON array of records
    Json,
    /// Excel workbook with a single worksheet
    Excel,
}

impl OutputFormat {
    /// File extension for artifacts of this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Excel => write!(f, "excel"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            other => Err(format!(
                "Invalid output format '{other}'. Must be one of: csv, json, excel"
            )),
        }
    }
}

/// Main Carta configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartaConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Catalog connection and authentication
    pub catalog: CatalogConfig,

    /// Export settings (asset types, format, paging, concurrency)
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CartaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Catalog connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog instance, e.g. `https://acme.catalog.example.com`
    pub instance_url: String,

    /// OAuth client id for the client-credentials grant
    pub client_id: String,

    /// OAuth client secret, kept behind the secrecy wrapper
    pub client_secret: SecretString,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Seconds before nominal expiry at which a cached token is refreshed
    #[serde(default = "default_token_safety_margin")]
    pub token_safety_margin_seconds: u64,

    /// Page-level retry behavior
    #[serde(default)]
    pub retry: RetryConfig,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.instance_url)
            .map_err(|e| format!("Invalid instance_url '{}': {}", self.instance_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "instance_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if self.client_id.trim().is_empty() {
            return Err("client_id must not be empty".to_string());
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err("client_secret must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than zero".to_string());
        }
        self.retry.validate()?;
        Ok(())
    }

    /// The OAuth token endpoint for this instance
    pub fn token_url(&self) -> String {
        format!("{}/rest/oauth/v2/token", self.instance_url.trim_end_matches('/'))
    }

    /// The GraphQL endpoint for this instance
    pub fn graphql_url(&self) -> String {
        format!(
            "{}/graphql/knowledgeGraph/v1",
            self.instance_url.trim_end_matches('/')
        )
    }
}

/// Retry configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per page (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=10).contains(&self.max_attempts) {
            return Err(format!(
                "retry.max_attempts must be between 1 and 10, got {}",
                self.max_attempts
            ));
        }
        Ok(())
    }
}

/// One asset type to export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetTypeConfig {
    /// Asset-type identifier (UUID)
    pub id: String,

    /// Optional display name, used for the output file name
    #[serde(default)]
    pub name: Option<String>,
}

impl AssetTypeConfig {
    /// Convert to the domain work unit
    pub fn to_request(&self) -> AssetTypeRequest {
        AssetTypeRequest {
            id: self.id.clone(),
            display_name: self.name.clone(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Asset types to export, in configuration order
    pub asset_types: Vec<AssetTypeConfig>,

    /// Assets requested per GraphQL page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Number of asset types fetched concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Output file format
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Directory where output artifacts are written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.asset_types.is_empty() {
            return Err("export.asset_types must list at least one asset type".to_string());
        }
        for asset_type in &self.asset_types {
            Uuid::parse_str(&asset_type.id).map_err(|_| {
                format!(
                    "Invalid asset type id '{}': expected a UUID",
                    asset_type.id
                )
            })?;
        }
        if !(1..=1000).contains(&self.page_size) {
            return Err(format!(
                "page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }
        if !(1..=32).contains(&self.concurrency) {
            return Err(format!(
                "concurrency must be between 1 and 32, got {}",
                self.concurrency
            ));
        }
        if self.output_dir.trim().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }
        Ok(())
    }

    /// The configured asset types as domain work units
    pub fn requests(&self) -> Vec<AssetTypeRequest> {
        self.asset_types.iter().map(AssetTypeConfig::to_request).collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: daily, hourly",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_token_safety_margin() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_page_size() -> u32 {
    500
}

fn default_concurrency() -> usize {
    5
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Csv
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
