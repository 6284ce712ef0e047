//! # Error Types
//!
//! Custom error types for the vibration monitor using `thiserror`.

use thiserror::Error;

/// Main error type for the vibration monitor
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Serial port could not be opened or used
    #[error("Serial error: {0}")]
    Serial(String),

    /// None of the candidate device paths could be opened
    #[error("No serial device found (tried: {0})")]
    SerialPortNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the vibration monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_port_not_found_lists_paths() {
        let err = MonitorError::SerialPortNotFound("/dev/ttyACM0, /dev/ttyUSB0".to_string());
        let msg = err.to_string();
        assert!(msg.contains("/dev/ttyACM0"));
        assert!(msg.contains("/dev/ttyUSB0"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MonitorError = io.into();
        assert!(matches!(err, MonitorError::Io(_)));
    }
}
