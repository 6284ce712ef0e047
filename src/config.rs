//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{MonitorError, Result};
use crate::serial::SUPPORTED_BAUD_RATES;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    /// Device path; empty means try the default device paths
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// Wait after opening the port while the board resets
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

/// Session buffer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,
}

/// Presentation configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_update_rate_hz")]
    pub update_rate_hz: u32,

    #[serde(default = "default_true")]
    pub show_rpm: bool,

    #[serde(default = "default_true")]
    pub show_frequencies: bool,

    #[serde(default)]
    pub show_angle: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; empty logs to the console only
    #[serde(default)]
    pub log_dir: String,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyACM0".to_string() }
fn default_baud_rate() -> u32 { 115_200 }
fn default_poll_timeout_ms() -> u64 { 50 }
fn default_settle_ms() -> u64 { 2000 }

fn default_capacity() -> usize { crate::telemetry::DEFAULT_CAPACITY }
fn default_recent_rows() -> usize { 10 }

fn default_update_rate_hz() -> u32 { 5 }
fn default_true() -> bool { true }

fn default_log_level() -> String { "info".to_string() }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            poll_timeout_ms: default_poll_timeout_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            recent_rows: default_recent_rows(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_rate_hz: default_update_rate_hz(),
            show_rpm: true,
            show_frequencies: true,
            show_angle: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

impl SerialConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl DisplayConfig {
    /// Time between two dashboard refreshes
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.update_rate_hz.max(1)))
    }
}

fn invalid(msg: impl std::fmt::Display) -> MonitorError {
    MonitorError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vibration_monitor::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_BAUD_RATES.contains(&self.serial.baud_rate) {
            return Err(invalid(format!(
                "baud_rate must be one of: {:?}",
                SUPPORTED_BAUD_RATES
            )));
        }

        if self.serial.poll_timeout_ms == 0 || self.serial.poll_timeout_ms > 1000 {
            return Err(invalid("poll_timeout_ms must be between 1 and 1000"));
        }

        if self.serial.settle_ms > 10_000 {
            return Err(invalid("settle_ms must be between 0 and 10000"));
        }

        if self.session.capacity == 0 || self.session.capacity > 100_000 {
            return Err(invalid("capacity must be between 1 and 100000"));
        }

        if self.session.recent_rows == 0 {
            return Err(invalid("recent_rows must be greater than 0"));
        }

        if !(1..=10).contains(&self.display.update_rate_hz) {
            return Err(invalid("update_rate_hz must be between 1 and 10"));
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(invalid("log level must be one of: trace, debug, info, warn, error"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.capacity, 200);
        assert_eq!(config.display.update_rate_hz, 5);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.serial.port, "/dev/ttyACM0");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.session.recent_rows, 10);
        assert!(config.display.show_rpm);
        assert!(!config.display.show_angle);
        assert!(config.logging.log_dir.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
[serial]
port = "/dev/ttyUSB1"
baud_rate = 9600

[display]
update_rate_hz = 10
show_angle = true
"#,
        )
        .unwrap();

        assert_eq!(config.serial.port, "/dev/ttyUSB1");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.poll_timeout_ms, 50);
        assert_eq!(config.display.update_rate_hz, 10);
        assert!(config.display.show_angle);
        assert!(config.display.show_frequencies);
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[serial]
port = "/dev/ttyACM1"

[session]
capacity = 500

[logging]
level = "debug"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.session.capacity, 500);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/monitor.toml");
        assert!(matches!(result, Err(MonitorError::Io(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml("[serial\nport = ");
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_empty_port_is_allowed() {
        let mut config = Config::default();
        config.serial.port = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let mut config = Config::default();
        config.serial.baud_rate = 420_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_baud_rates() {
        for &baud in SUPPORTED_BAUD_RATES {
            let mut config = Config::default();
            config.serial.baud_rate = baud;
            assert!(config.validate().is_ok(), "Baud rate {} should be valid", baud);
        }
    }

    #[test]
    fn test_poll_timeout_bounds() {
        let mut config = Config::default();
        config.serial.poll_timeout_ms = 0;
        assert!(config.validate().is_err());
        config.serial.poll_timeout_ms = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settle_too_long() {
        let mut config = Config::default();
        config.serial.settle_ms = 10_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capacity_zero() {
        let mut config = Config::default();
        config.session.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recent_rows_zero() {
        let mut config = Config::default();
        config.session.recent_rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_update_rate_bounds() {
        for rate in [0, 11, 60] {
            let mut config = Config::default();
            config.display.update_rate_hz = rate;
            assert!(config.validate().is_err(), "Update rate {} should be invalid", rate);
        }
        for rate in 1..=10 {
            let mut config = Config::default();
            config.display.update_rate_hz = rate;
            assert!(config.validate().is_ok(), "Update rate {} should be valid", rate);
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.serial.poll_timeout(), Duration::from_millis(50));
        assert_eq!(config.serial.settle(), Duration::from_secs(2));
        assert_eq!(config.display.refresh_period(), Duration::from_millis(200));
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_serial_port(), "/dev/ttyACM0");
        assert_eq!(default_baud_rate(), 115_200);
        assert_eq!(default_poll_timeout_ms(), 50);
        assert_eq!(default_settle_ms(), 2000);
        assert_eq!(default_capacity(), 200);
        assert_eq!(default_recent_rows(), 10);
        assert_eq!(default_update_rate_hz(), 5);
        assert_eq!(default_log_level(), "info");
    }
}
