//! # Telemetry Line Protocol
//!
//! The board prints one JSON object per line:
//!
//! ```text
//! {"rpm": 3120, "angle": 84, "freq_fundamental": 52.00, "freq_harmonic": 156.00, "defect": false}
//! ```
//!
//! This module handles:
//! - Separating telemetry objects from boot messages and other chatter
//! - Decoding objects into typed readings
//! - Classifying rejected lines

pub mod line;

pub use line::{decode_line, LineError};
