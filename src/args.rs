//! Command line arguments, parsed with clap

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(version, about)]
pub struct MonitorArgs {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Serial device, overrides the configured port
    #[arg(short = 'p', long = "port")]
    pub port: Option<String>,

    /// Baud rate, overrides the configured value
    #[arg(short = 'b', long = "baud")]
    pub baud: Option<u32>,

    /// Use synthetic telemetry instead of a serial device
    #[arg(long)]
    pub demo: bool,

    /// Print the available serial ports and exit
    #[arg(long = "list-ports")]
    pub list_ports: bool,

    /// Print each snapshot as a JSON line instead of the text report
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = MonitorArgs::parse_from(["vibration-monitor"]);
        assert!(args.config.is_none());
        assert!(args.port.is_none());
        assert!(!args.demo);
        assert!(!args.list_ports);
        assert!(!args.json);
    }

    #[test]
    fn test_overrides() {
        let args = MonitorArgs::parse_from([
            "vibration-monitor",
            "-c",
            "monitor.toml",
            "--port",
            "/dev/ttyUSB0",
            "-b",
            "9600",
            "--json",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("monitor.toml")));
        assert_eq!(args.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(args.baud, Some(9600));
        assert!(args.json);
    }

    #[test]
    fn test_rejects_non_numeric_baud() {
        assert!(MonitorArgs::try_parse_from(["vibration-monitor", "--baud", "fast"]).is_err());
    }
}
