//! Configuration management for contas
//!
//! This module handles loading, validation, and management of
//! contas configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Persisted state location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON key-value file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Key holding the starting balance
    #[serde(default = "default_balance_key")]
    pub balance_key: String,
    /// Key holding the bill list
    #[serde(default = "default_bills_key")]
    pub bills_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            balance_key: default_balance_key(),
            bills_key: default_bills_key(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/contas.json")
}

fn default_balance_key() -> String {
    "saldoInicial".to_string()
}

fn default_bills_key() -> String {
    "contas".to_string()
}

/// Bill list behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillsConfig {
    /// Bills due within this many days (inclusive) are flagged as due soon
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
}

impl Default for BillsConfig {
    fn default() -> Self {
        Self {
            due_soon_days: default_due_soon_days(),
        }
    }
}

fn default_due_soon_days() -> i64 {
    7
}

/// PDF report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory where `contas export` writes reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Author line printed under the report title
    #[serde(default = "default_author")]
    pub author: String,
    /// Append the chart snapshot page
    #[serde(default = "default_true")]
    pub include_chart: bool,
    /// Raster scale factor for the chart snapshot (1-4)
    #[serde(default = "default_chart_scale")]
    pub chart_scale: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            author: default_author(),
            include_chart: true,
            chart_scale: default_chart_scale(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./relatorios")
}

fn default_author() -> String {
    "Gerenciador Financeiro Pessoal".to_string()
}

fn default_chart_scale() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator (empty for none)
    #[serde(default)]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default = "default_symbol_position")]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: 2,
            thousands_separator: String::new(),
            decimal_separator: ".".to_string(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

fn default_symbol_position() -> SymbolPosition {
    SymbolPosition::Before
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

impl Default for SymbolPosition {
    fn default() -> Self {
        SymbolPosition::Before
    }
}

impl std::str::FromStr for SymbolPosition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" => Ok(SymbolPosition::Before),
            "after" => Ok(SymbolPosition::After),
            _ => Err(format!("Invalid symbol position: {}", s)),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Persisted state settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Bill list settings
    #[serde(default)]
    pub bills: BillsConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if !(0..=365).contains(&self.bills.due_soon_days) {
            return Err(ConfigError::InvalidValue {
                field: "bills.due_soon_days".to_string(),
                reason: "Due-soon window must be between 0 and 365 days".to_string(),
            });
        }

        if !(1..=4).contains(&self.report.chart_scale) {
            return Err(ConfigError::InvalidValue {
                field: "report.chart_scale".to_string(),
                reason: "Chart scale must be between 1 and 4".to_string(),
            });
        }

        if self.storage.balance_key.is_empty() || self.storage.bills_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "storage.balance_key / storage.bills_key".to_string(),
            });
        }

        if self.storage.balance_key == self.storage.bills_key {
            return Err(ConfigError::InvalidValue {
                field: "storage.bills_key".to_string(),
                reason: "Balance and bill keys must differ".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the web interface binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.storage.balance_key, "saldoInicial");
        assert_eq!(config.storage.bills_key, "contas");
        assert_eq!(config.bills.due_soon_days, 7);
        assert_eq!(config.currency.symbol, "R$");
        assert_eq!(config.currency.symbol_position, SymbolPosition::Before);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8082");
        assert_eq!(config.report.chart_scale, 2);
        assert!(config.report.include_chart);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_invalid_chart_scale_rejected() {
        let err = Config::from_yaml("report:\n  chart_scale: 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "report.chart_scale"));
    }

    #[test]
    fn test_same_storage_keys_rejected() {
        let yaml = "storage:\n  balance_key: a\n  bills_key: a\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_symbol_position_from_str() {
        assert_eq!("after".parse::<SymbolPosition>().unwrap(), SymbolPosition::After);
        assert!("middle".parse::<SymbolPosition>().is_err());
    }
}
