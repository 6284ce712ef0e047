//! # Session Snapshot
//!
//! Immutable copy of the session buffers plus the statistics derived from them.
//!
//! All statistics are computed over the buffer contents at snapshot time, so the
//! defect percentage denominator is the current buffer length, not the
//! configured capacity. Statistics over an empty buffer return `None`.

use chrono::{DateTime, Local};

use super::sample::Sample;

/// RPM summary over the buffered samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RpmStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Point-in-time view of a [`TelemetrySession`](super::TelemetrySession).
///
/// The six vectors are index-aligned and ordered oldest first.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Configured session capacity
    pub capacity: usize,
    /// Wall-clock session start
    pub started_at: DateTime<Local>,
    pub time: Vec<f64>,
    pub rpm: Vec<f64>,
    pub angle: Vec<f64>,
    pub freq_fundamental: Vec<f64>,
    pub freq_harmonic: Vec<f64>,
    pub defect: Vec<bool>,
}

impl Snapshot {
    /// Number of samples in the snapshot.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Reassembles the sample at `index` (0 = oldest).
    pub fn sample(&self, index: usize) -> Option<Sample> {
        if index >= self.len() {
            return None;
        }

        Some(Sample {
            timestamp: self.time[index],
            rpm: self.rpm[index],
            angle: self.angle[index],
            freq_fundamental: self.freq_fundamental[index],
            freq_harmonic: self.freq_harmonic[index],
            defect: self.defect[index],
        })
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.sample(i))
    }

    /// Last `min(n, len)` samples in original order.
    pub fn recent(&self, n: usize) -> Vec<Sample> {
        let start = self.len().saturating_sub(n);
        (start..self.len()).filter_map(|i| self.sample(i)).collect()
    }

    pub fn rpm_mean(&self) -> Option<f64> {
        if self.rpm.is_empty() {
            return None;
        }
        Some(self.rpm.iter().sum::<f64>() / self.rpm.len() as f64)
    }

    pub fn rpm_max(&self) -> Option<f64> {
        self.rpm.iter().copied().reduce(f64::max)
    }

    pub fn rpm_min(&self) -> Option<f64> {
        self.rpm.iter().copied().reduce(f64::min)
    }

    /// Mean, max and min RPM, or `None` when there is no data.
    pub fn rpm_stats(&self) -> Option<RpmStats> {
        Some(RpmStats {
            mean: self.rpm_mean()?,
            max: self.rpm_max()?,
            min: self.rpm_min()?,
        })
    }

    /// Number of samples flagged as defective.
    pub fn defect_count(&self) -> usize {
        self.defect.iter().filter(|&&d| d).count()
    }

    /// Share of buffered samples flagged as defective, in percent.
    pub fn defect_percent(&self) -> Option<f64> {
        if self.defect.is_empty() {
            return None;
        }
        Some(self.defect_count() as f64 / self.defect.len() as f64 * 100.0)
    }
}
