//! # Telemetry Session
//!
//! Owns the rolling history of the current monitoring session.
//!
//! Six bounded series (time, rpm, angle, fundamental frequency, harmonic
//! frequency, defect flag) share a logical index: element `i` of every series
//! comes from the same sample. All series are pushed together and therefore
//! evict together, so they always have equal length.
//!
//! ## Usage
//!
//! ```
//! use vibration_monitor::telemetry::{Sample, TelemetrySession};
//!
//! let mut session = TelemetrySession::new(3);
//! for i in 0..5 {
//!     session.ingest(Sample {
//!         timestamp: i as f64,
//!         rpm: 1000.0 * i as f64,
//!         angle: 0.0,
//!         freq_fundamental: 0.0,
//!         freq_harmonic: 0.0,
//!         defect: false,
//!     });
//! }
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.rpm, vec![2000.0, 3000.0, 4000.0]);
//! ```

use chrono::{DateTime, Local};
use std::time::Instant;
use tracing::debug;

use super::sample::{Reading, Sample};
use super::series::BoundedSeries;
use super::snapshot::Snapshot;

/// Default number of samples retained per channel
pub const DEFAULT_CAPACITY: usize = 200;

/// Rolling multi-channel telemetry buffer for one monitoring session.
#[derive(Debug, Clone)]
pub struct TelemetrySession {
    time: BoundedSeries<f64>,
    rpm: BoundedSeries<f64>,
    angle: BoundedSeries<f64>,
    freq_fundamental: BoundedSeries<f64>,
    freq_harmonic: BoundedSeries<f64>,
    defect: BoundedSeries<bool>,
    /// Wall-clock session start (for display)
    started_at: DateTime<Local>,
    /// Monotonic session start (for relative timestamps)
    started: Instant,
}

impl Default for TelemetrySession {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TelemetrySession {
    /// Creates an empty session retaining at most `capacity` samples.
    ///
    /// A capacity of 0 is raised to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            time: BoundedSeries::with_capacity(capacity),
            rpm: BoundedSeries::with_capacity(capacity),
            angle: BoundedSeries::with_capacity(capacity),
            freq_fundamental: BoundedSeries::with_capacity(capacity),
            freq_harmonic: BoundedSeries::with_capacity(capacity),
            defect: BoundedSeries::with_capacity(capacity),
            started_at: Local::now(),
            started: Instant::now(),
        }
    }

    /// Appends one sample to every channel, evicting the oldest sample when full.
    pub fn ingest(&mut self, sample: Sample) {
        self.time.push(sample.timestamp);
        self.rpm.push(sample.rpm);
        self.angle.push(sample.angle);
        self.freq_fundamental.push(sample.freq_fundamental);
        self.freq_harmonic.push(sample.freq_harmonic);
        self.defect.push(sample.defect);

        debug_assert!(self.is_aligned());
    }

    /// Stamps a wire reading with the current session time and ingests it.
    ///
    /// Returns the stored sample.
    pub fn ingest_reading(&mut self, reading: Reading) -> Sample {
        let sample = Sample::from_reading(reading, self.elapsed_secs());
        self.ingest(sample);
        sample
    }

    /// Drops all buffered samples and restarts the session clock.
    pub fn reset(&mut self) {
        self.time.clear();
        self.rpm.clear();
        self.angle.clear();
        self.freq_fundamental.clear();
        self.freq_harmonic.clear();
        self.defect.clear();
        self.started_at = Local::now();
        self.started = Instant::now();
        debug!("Telemetry session reset");
    }

    /// Seconds elapsed since the session started (or was last reset).
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Number of buffered samples (identical for every channel).
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.time.capacity()
    }

    /// Copies the current contents into an immutable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            capacity: self.capacity(),
            started_at: self.started_at,
            time: self.time.to_vec(),
            rpm: self.rpm.to_vec(),
            angle: self.angle.to_vec(),
            freq_fundamental: self.freq_fundamental.to_vec(),
            freq_harmonic: self.freq_harmonic.to_vec(),
            defect: self.defect.to_vec(),
        }
    }

    fn is_aligned(&self) -> bool {
        let len = self.time.len();
        self.rpm.len() == len
            && self.angle.len() == len
            && self.freq_fundamental.len() == len
            && self.freq_harmonic.len() == len
            && self.defect.len() == len
    }
}
