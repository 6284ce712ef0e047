//! # Serial Communication Module
//!
//! Handles the serial link to the telemetry board.
//!
//! This module handles:
//! - Enumerating available serial devices
//! - Opening the port (8N1, no flow control) at the configured baud rate
//! - Framing the byte stream into newline-terminated lines
//! - Non-blocking "one line or none" polling

pub mod framer;
pub mod port_trait;

pub use framer::{LineFramer, MAX_LINE_LEN};
pub use port_trait::{LineReader, LineSource};

use std::time::Duration;

use crate::error::{MonitorError, Result};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

/// Default baud rate of the board firmware
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Baud rates the firmware can be built with
pub const SUPPORTED_BAUD_RATES: &[u32] = &[9600, 115_200];

/// Device paths tried (in order) when no port is configured
pub const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyACM0", // Native USB boards (Uno R3, Leonardo)
    "/dev/ttyUSB0", // CH340 / FTDI adapters
];

/// Line source backed by a serial port
pub type SerialLineSource = LineReader<tokio_serial::SerialStream>;

impl LineReader<tokio_serial::SerialStream> {
    /// Open a serial port for telemetry
    ///
    /// # Arguments
    ///
    /// * `path` - Device path (e.g., "/dev/ttyACM0" or "COM3")
    /// * `baud_rate` - Line speed, must match the firmware
    /// * `poll_timeout` - Longest wait for data in a single poll
    ///
    /// # Returns
    ///
    /// * `Result<SerialLineSource>` - Opened line source
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Serial` if the device cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use vibration_monitor::serial::SerialLineSource;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let source = SerialLineSource::open("/dev/ttyACM0", 115_200, Duration::from_millis(50))?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open(path: &str, baud_rate: u32, poll_timeout: Duration) -> Result<Self> {
        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| MonitorError::Serial(format!("Failed to open {}: {}", path, e)))?;

        info!("Opened serial port {} at {} baud", path, baud_rate);
        Ok(LineReader::new(port, path, poll_timeout))
    }

    /// Open the first device that succeeds from a list of candidate paths
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::SerialPortNotFound` listing every path tried
    pub fn open_first(paths: &[&str], baud_rate: u32, poll_timeout: Duration) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open(path, baud_rate, poll_timeout) {
                Ok(source) => return Ok(source),
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            }
        }

        Err(MonitorError::SerialPortNotFound(paths.join(", ")))
    }
}

/// List the serial devices present on this machine
///
/// # Errors
///
/// Returns `MonitorError::Serial` if enumeration is not supported or fails
pub fn list_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| MonitorError::Serial(format!("Failed to enumerate ports: {}", e)))?;

    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_BAUD_RATE, 115_200);
        assert!(SUPPORTED_BAUD_RATES.contains(&DEFAULT_BAUD_RATE));
        assert!(SUPPORTED_BAUD_RATES.contains(&9600));
        assert_eq!(DEFAULT_DEVICE_PATHS, &["/dev/ttyACM0", "/dev/ttyUSB0"]);
    }

    #[tokio::test]
    async fn test_open_with_invalid_path_returns_error() {
        let result = SerialLineSource::open("/dev/nonexistent_serial_device_12345", 115_200, TIMEOUT);

        match result {
            Err(MonitorError::Serial(msg)) => {
                assert!(msg.contains("/dev/nonexistent_serial_device_12345"));
                assert!(msg.contains("Failed to open"));
            }
            other => panic!("Expected Serial error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_first_with_invalid_paths_returns_error() {
        let invalid_paths = &["/dev/nonexistent0", "/dev/nonexistent1"];

        match SerialLineSource::open_first(invalid_paths, 115_200, TIMEOUT) {
            Err(MonitorError::SerialPortNotFound(msg)) => {
                assert!(msg.contains("/dev/nonexistent0"));
                assert!(msg.contains("/dev/nonexistent1"));
            }
            other => panic!("Expected SerialPortNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_first_with_empty_paths_returns_error() {
        let empty_paths: &[&str] = &[];
        assert!(matches!(
            SerialLineSource::open_first(empty_paths, 115_200, TIMEOUT),
            Err(MonitorError::SerialPortNotFound(_))
        ));
    }

    // Integration test - only runs if a board is connected
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_read_line_from_real_hardware() {
        let Ok(mut source) = SerialLineSource::open_first(DEFAULT_DEVICE_PATHS, DEFAULT_BAUD_RATE, Duration::from_secs(2)) else {
            println!("No board detected (this is OK for CI/CD)");
            return;
        };

        tokio::time::sleep(Duration::from_secs(2)).await;
        for _ in 0..10 {
            if let Ok(Some(line)) = source.poll_line().await {
                println!("Received from {}: {}", source.describe(), line);
                return;
            }
        }
        println!("Board connected but silent");
    }

    #[test]
    #[ignore] // Depends on host devices
    fn test_list_ports() {
        let ports = list_ports().unwrap();
        println!("Available ports: {:?}", ports);
    }
}
