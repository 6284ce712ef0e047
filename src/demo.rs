//! # Demo Source
//!
//! Synthetic telemetry for running the monitor without a board attached.
//!
//! Plays the role of the firmware: RPM follows a slow sine wave with gaussian
//! noise, the servo angle maps RPM 500..6000 onto 0..180 degrees, the
//! fundamental is RPM / 60 with its third harmonic alongside, and the defect
//! flag is raised above [`DEFECT_RPM_THRESHOLD`].

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::io;

use crate::serial::LineSource;
use crate::telemetry::sample::DEFECT_RPM_THRESHOLD;
use crate::telemetry::Reading;

/// Simulated seconds between two lines
pub const DEFAULT_STEP_SECS: f64 = 0.1;

const BASE_RPM: f64 = 2000.0;
const SWING_RPM: f64 = 1500.0;
const NOISE_RPM: f64 = 100.0;
const ANGULAR_RATE: f64 = 0.5;
const SERVO_RPM_MIN: f64 = 500.0;
const SERVO_RPM_MAX: f64 = 6000.0;

/// Line source producing firmware-shaped JSON lines
#[derive(Debug)]
pub struct DemoSource {
    rng: StdRng,
    t: f64,
    step: f64,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            t: 0.0,
            step: DEFAULT_STEP_SECS,
        }
    }

    /// Deterministic source for tests and reproducible demos
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            t: 0.0,
            step: DEFAULT_STEP_SECS,
        }
    }

    /// Generate the next reading and advance simulated time
    pub fn next_reading(&mut self) -> Reading {
        let noise: f64 = self.rng.sample(StandardNormal);
        let rpm = (BASE_RPM + SWING_RPM * (ANGULAR_RATE * self.t).sin() + noise * NOISE_RPM)
            .round()
            .max(0.0);
        self.t += self.step;

        let angle = ((rpm - SERVO_RPM_MIN) / (SERVO_RPM_MAX - SERVO_RPM_MIN) * 180.0).clamp(0.0, 180.0);
        let freq_fundamental = rpm / 60.0;

        Reading {
            rpm,
            angle: angle.round(),
            freq_fundamental,
            freq_harmonic: freq_fundamental * 3.0,
            defect: rpm > DEFECT_RPM_THRESHOLD,
        }
    }
}

#[async_trait]
impl LineSource for DemoSource {
    async fn poll_line(&mut self) -> io::Result<Option<String>> {
        let reading = self.next_reading();
        serde_json::to_string(&reading)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode_line;

    #[test]
    fn test_seeded_sources_are_deterministic() {
        let mut a = DemoSource::with_seed(7);
        let mut b = DemoSource::with_seed(7);
        for _ in 0..50 {
            assert_eq!(a.next_reading(), b.next_reading());
        }
    }

    #[test]
    fn test_readings_follow_firmware_rules() {
        let mut source = DemoSource::with_seed(42);
        for _ in 0..500 {
            let r = source.next_reading();
            assert_eq!(r.defect, r.rpm > DEFECT_RPM_THRESHOLD);
            assert!((0.0..=180.0).contains(&r.angle));
            assert!((r.freq_fundamental - r.rpm / 60.0).abs() < 1e-9);
            assert!((r.freq_harmonic - 3.0 * r.freq_fundamental).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wave_crosses_defect_threshold() {
        // Peak of the sine (2000 + 1500) sits at the threshold, noise pushes it over
        let mut source = DemoSource::with_seed(1);
        let readings: Vec<Reading> = (0..200).map(|_| source.next_reading()).collect();
        assert!(readings.iter().any(|r| r.defect));
        assert!(readings.iter().any(|r| !r.defect));
    }

    #[tokio::test]
    async fn test_lines_decode() {
        let mut source = DemoSource::with_seed(3);
        for _ in 0..20 {
            let line = source.poll_line().await.unwrap().unwrap();
            let reading = decode_line(&line).unwrap();
            assert_eq!(reading.defect, reading.rpm > DEFECT_RPM_THRESHOLD);
        }
        assert_eq!(source.describe(), "demo");
    }
}
