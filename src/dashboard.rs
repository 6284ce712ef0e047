//! # Dashboard
//!
//! Turns a [`Snapshot`] into something a person (or another program) can read:
//! a plain text report for the terminal, or a JSON document for an external UI.

use serde_json::{json, Value};

use crate::config::DisplayConfig;
use crate::telemetry::sample::DEFECT_RPM_THRESHOLD;
use crate::telemetry::{Sample, Snapshot};

const NO_DATA: &str = "no data";

/// Render the full text report
///
/// Sections: header, current reading, session statistics, recent readings.
/// Channel columns follow the `show_*` switches of `display`.
pub fn render_text(snapshot: &Snapshot, display: &DisplayConfig, recent_rows: usize) -> String {
    let mut lines = vec![format!(
        "== Vibration monitor | {}/{} samples | session started {} ==",
        snapshot.len(),
        snapshot.capacity,
        snapshot.started_at.format("%H:%M:%S")
    )];

    match snapshot.latest() {
        Some(latest) => {
            lines.push(current_line(&latest, display));
            lines.push(statistics_line(snapshot));
            lines.push(format!("-- Last {} readings --", recent_rows.min(snapshot.len())));
            lines.push(table_header(display));
            lines.extend(snapshot.recent(recent_rows).iter().map(|s| table_row(s, display)));
        }
        None => lines.push("Waiting for telemetry...".to_string()),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// "Current" metrics row built from the most recent sample
pub fn current_line(sample: &Sample, display: &DisplayConfig) -> String {
    let mut parts = Vec::new();

    if display.show_rpm {
        let marker = if sample.rpm > DEFECT_RPM_THRESHOLD { " (>threshold)" } else { "" };
        parts.push(format!("RPM {}{}", sample.rpm, marker));
    }
    if display.show_angle {
        parts.push(format!("Angle {}°", sample.angle));
    }
    if display.show_frequencies {
        parts.push(format!("F0 {:.2} Hz", sample.freq_fundamental));
        parts.push(format!("F3 {:.2} Hz", sample.freq_harmonic));
    }

    let status = if sample.defect { "DEFECT!" } else { "Normal" };
    parts.push(format!("Status {}", status));

    parts.join(" | ")
}

/// Session statistics row; "no data" on an empty snapshot
pub fn statistics_line(snapshot: &Snapshot) -> String {
    let rpm = match snapshot.rpm_stats() {
        Some(stats) => format!(
            "RPM mean {:.0} | max {:.0} | min {:.0}",
            stats.mean, stats.max, stats.min
        ),
        None => format!("RPM {}", NO_DATA),
    };

    let defect = match snapshot.defect_percent() {
        Some(percent) => format!("{:.1}% in defect ({} samples)", percent, snapshot.defect_count()),
        None => NO_DATA.to_string(),
    };

    format!("{} | {}", rpm, defect)
}

fn table_header(display: &DisplayConfig) -> String {
    let mut cols = vec![format!("{:>8}", "Time (s)")];
    if display.show_rpm {
        cols.push(format!("{:>7}", "RPM"));
    }
    if display.show_angle {
        cols.push(format!("{:>9}", "Angle (°)"));
    }
    if display.show_frequencies {
        cols.push(format!("{:>10}", "F0 (Hz)"));
        cols.push(format!("{:>10}", "F3 (Hz)"));
    }
    cols.push("Status".to_string());
    cols.join("  ")
}

fn table_row(sample: &Sample, display: &DisplayConfig) -> String {
    let mut cols = vec![format!("{:>8.2}", sample.timestamp)];
    if display.show_rpm {
        cols.push(format!("{:>7}", sample.rpm));
    }
    if display.show_angle {
        cols.push(format!("{:>9}", sample.angle));
    }
    if display.show_frequencies {
        cols.push(format!("{:>10.2}", sample.freq_fundamental));
        cols.push(format!("{:>10.2}", sample.freq_harmonic));
    }
    cols.push(sample.status_label().to_string());
    cols.join("  ")
}

/// Render the snapshot as a JSON document
///
/// Statistics without data are `null`.
pub fn render_json(snapshot: &Snapshot, recent_rows: usize) -> Value {
    let stats = snapshot.rpm_stats();

    json!({
        "started_at": snapshot.started_at.to_rfc3339(),
        "capacity": snapshot.capacity,
        "len": snapshot.len(),
        "latest": snapshot.latest(),
        "stats": {
            "rpm_mean": stats.map(|s| s.mean),
            "rpm_max": stats.map(|s| s.max),
            "rpm_min": stats.map(|s| s.min),
            "defect_count": snapshot.defect_count(),
            "defect_percent": snapshot.defect_percent(),
            "defect_rpm_threshold": DEFECT_RPM_THRESHOLD,
        },
        "series": {
            "time": snapshot.time,
            "rpm": snapshot.rpm,
            "angle": snapshot.angle,
            "freq_fundamental": snapshot.freq_fundamental,
            "freq_harmonic": snapshot.freq_harmonic,
            "defect": snapshot.defect,
        },
        "recent": snapshot.recent(recent_rows),
    })
}
