//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Carta using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Carta - Governance Catalog Bulk Export Tool
#[derive(Parser, Debug)]
#[command(name = "carta")]
#[command(version, about, long_about = None)]
#[command(author = "Carta Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "carta.toml", env = "CARTA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CARTA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export configured asset types to flat files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["carta", "export"]);
        assert_eq!(cli.config, "carta.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["carta", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["carta", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "carta",
            "export",
            "--format",
            "json",
            "--output-dir",
            "out",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.format, Some("json".to_string()));
                assert_eq!(args.output_dir, Some("out".to_string()));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["carta", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["carta", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
