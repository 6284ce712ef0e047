//! # Telemetry Module
//!
//! Live-session aggregation of telemetry samples.
//!
//! This module handles:
//! - The sample records produced by the microcontroller
//! - Fixed-capacity rolling history per channel (lockstep FIFO eviction)
//! - Session statistics (RPM mean/min/max, defect rate)
//! - Read-only snapshots for the presentation layer

pub mod sample;
pub mod series;
pub mod session;
pub mod snapshot;

pub use sample::{Reading, Sample};
pub use session::{TelemetrySession, DEFAULT_CAPACITY};
pub use snapshot::{RpmStats, Snapshot};
