//! # Monitor
//!
//! Connects a [`LineSource`] to a [`TelemetrySession`].
//!
//! Each call to [`Monitor::poll_once`] reads at most one line, decodes it and
//! ingests the resulting sample. Nothing read from the source can make the
//! monitor fail: bad lines and transport errors are counted, logged and turn
//! into "no sample this tick". A transport error that cannot clear by itself
//! (closed stream, unplugged device) also detaches the source.

use std::io;
use tracing::{debug, error, info, trace, warn};

use crate::protocol::decode_line;
use crate::serial::LineSource;
use crate::telemetry::{Sample, Snapshot, TelemetrySession};

/// Whether a line source is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Counters over everything the monitor has read since it was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Lines that became samples
    pub accepted: u64,
    /// Object-shaped lines that failed to decode
    pub malformed: u64,
    /// Blank lines and non-object chatter
    pub discarded: u64,
    /// Read failures reported by the source
    pub transport_errors: u64,
}

/// Result of reading one line
enum PollOutcome {
    Sample(Sample),
    /// A line arrived but produced no sample
    Rejected,
    /// Nothing to read (disconnected, no data, or transport error)
    Idle,
}

/// Poller owning the session and the (optional) connected source
pub struct Monitor<S> {
    session: TelemetrySession,
    source: Option<S>,
    stats: IngestStats,
}

impl<S: LineSource> Monitor<S> {
    /// Creates a disconnected monitor around an existing session
    pub fn new(session: TelemetrySession) -> Self {
        Self {
            session,
            source: None,
            stats: IngestStats::default(),
        }
    }

    /// Attach a source, replacing any current one.
    ///
    /// The session is reset so relative timestamps restart from zero.
    pub fn connect(&mut self, source: S) {
        let name = source.describe();
        if let Some(previous) = self.source.replace(source) {
            info!("Replacing source {} with {}", previous.describe(), name);
        }
        self.session.reset();
        info!("Connected to {}", name);
    }

    /// Detach the current source, if any. Buffered samples are kept.
    pub fn disconnect(&mut self) -> Option<S> {
        let source = self.source.take();
        if let Some(ref s) = source {
            info!("Disconnected from {}", s.describe());
        }
        source
    }

    pub fn is_connected(&self) -> bool {
        self.source.is_some()
    }

    pub fn connection_state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Read and ingest at most one line.
    ///
    /// Returns the stored sample, or `None` when disconnected, when no line
    /// was available, or when the line was rejected.
    pub async fn poll_once(&mut self) -> Option<Sample> {
        match self.poll_outcome().await {
            PollOutcome::Sample(sample) => Some(sample),
            PollOutcome::Rejected | PollOutcome::Idle => None,
        }
    }

    /// Poll repeatedly until the source has nothing more to give, or `max_lines`
    /// lines have been read. Returns the number of samples ingested.
    pub async fn drain(&mut self, max_lines: usize) -> usize {
        let mut ingested = 0;
        for _ in 0..max_lines {
            match self.poll_outcome().await {
                PollOutcome::Sample(_) => ingested += 1,
                PollOutcome::Rejected => {}
                PollOutcome::Idle => break,
            }
        }
        ingested
    }

    async fn poll_outcome(&mut self) -> PollOutcome {
        let Some(source) = self.source.as_mut() else {
            return PollOutcome::Idle;
        };

        let line = match source.poll_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return PollOutcome::Idle,
            Err(e) => {
                self.stats.transport_errors += 1;
                let name = source.describe();
                if is_transient(&e) {
                    warn!("Read error on {}: {}", name, e);
                } else {
                    error!("Lost connection to {}: {}", name, e);
                    self.disconnect();
                }
                return PollOutcome::Idle;
            }
        };

        match decode_line(&line) {
            Ok(reading) => {
                let sample = self.session.ingest_reading(reading);
                self.stats.accepted += 1;
                debug!(
                    "t={:.2}s rpm={} angle={} f0={:.2}Hz f3={:.2}Hz defect={}",
                    sample.timestamp,
                    sample.rpm,
                    sample.angle,
                    sample.freq_fundamental,
                    sample.freq_harmonic,
                    sample.defect
                );
                PollOutcome::Sample(sample)
            }
            Err(e) if e.is_notice() => {
                self.stats.malformed += 1;
                warn!("Ignoring telemetry line: {}", e);
                PollOutcome::Rejected
            }
            Err(e) => {
                self.stats.discarded += 1;
                trace!("Discarded line: {}", e);
                PollOutcome::Rejected
            }
        }
    }

    /// Clear buffered samples and restart the session clock
    pub fn reset(&mut self) {
        self.session.reset();
        info!("Session data reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &TelemetrySession {
        &self.session
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}

/// Errors after which the same source may still produce data
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
