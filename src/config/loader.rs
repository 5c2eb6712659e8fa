//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Loading is a three step process: read the TOML file, substitute
//! `${VAR}` placeholders from the environment, then apply `CARTA_*`
//! overrides before validating the result.

use super::schema::CartaConfig;
use crate::config::secret_string;
use crate::domain::errors::CartaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use carta::config::loader::load_config;
///
/// let config = load_config("carta.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CartaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CartaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CartaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CartaConfig = toml::from_str(&contents)
        .map_err(|e| CartaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CartaError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line so placeholders in comments are left alone
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CartaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CARTA_* prefix
///
/// Environment variables follow the pattern: CARTA_<SECTION>_<KEY>
/// For example: CARTA_CATALOG_INSTANCE_URL, CARTA_EXPORT_OUTPUT_FORMAT
fn apply_env_overrides(config: &mut CartaConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CARTA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Catalog overrides
    if let Ok(val) = std::env::var("CARTA_CATALOG_INSTANCE_URL") {
        config.catalog.instance_url = val;
    }
    if let Ok(val) = std::env::var("CARTA_CATALOG_CLIENT_ID") {
        config.catalog.client_id = val;
    }
    if let Ok(val) = std::env::var("CARTA_CATALOG_CLIENT_SECRET") {
        config.catalog.client_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("CARTA_CATALOG_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.catalog.timeout_seconds = timeout;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("CARTA_EXPORT_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.export.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("CARTA_EXPORT_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.export.concurrency = concurrency;
        }
    }
    if let Ok(val) = std::env::var("CARTA_EXPORT_OUTPUT_FORMAT") {
        if let Ok(format) = val.parse() {
            config.export.output_format = format;
        }
    }
    if let Ok(val) = std::env::var("CARTA_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CARTA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CARTA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
