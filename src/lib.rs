//! # Vibration Monitor Library
//!
//! Live RPM and vibration telemetry from a serial-attached microcontroller.
//!
//! This library provides the pieces of the monitor: decoding the board's JSON
//! lines, buffering the most recent samples per channel, deriving session
//! statistics and presenting snapshots of the session.

pub mod args;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod monitor;
pub mod protocol;
pub mod serial;
pub mod telemetry;
