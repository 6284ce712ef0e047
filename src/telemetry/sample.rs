//! # Telemetry Records
//!
//! The wire record sent by the microcontroller and the timestamped sample
//! stored by the session.

use serde::{Deserialize, Serialize};

/// RPM above which the firmware raises the defect flag.
///
/// The session never recomputes the flag from this value; it is kept for the
/// presentation layer (reference line) and the demo source.
pub const DEFECT_RPM_THRESHOLD: f64 = 3500.0;

/// One telemetry line as received from the board.
///
/// Every field is required. Unknown keys are ignored so newer firmware can add
/// fields without breaking the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Rotational speed
    pub rpm: f64,

    /// Servo angle in degrees
    pub angle: f64,

    /// Fundamental frequency in Hz
    pub freq_fundamental: f64,

    /// Third harmonic frequency in Hz
    pub freq_harmonic: f64,

    /// Upstream anomaly verdict
    pub defect: bool,
}

/// A reading stamped with its arrival time relative to session start.
///
/// The value fields carry the same units as their [`Reading`] counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Seconds since session start
    pub timestamp: f64,
    pub rpm: f64,
    pub angle: f64,
    pub freq_fundamental: f64,
    pub freq_harmonic: f64,
    pub defect: bool,
}

impl Sample {
    /// Builds a sample from a wire reading and its session-relative timestamp.
    #[must_use]
    pub fn from_reading(reading: Reading, timestamp: f64) -> Self {
        Self {
            timestamp,
            rpm: reading.rpm,
            angle: reading.angle,
            freq_fundamental: reading.freq_fundamental,
            freq_harmonic: reading.freq_harmonic,
            defect: reading.defect,
        }
    }

    /// Status label used in tables ("DEFECT" / "OK").
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.defect {
            "DEFECT"
        } else {
            "OK"
        }
    }
}
