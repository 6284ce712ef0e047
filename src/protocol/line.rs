//! # Line Decoder
//!
//! Decodes one text line into a [`Reading`].

use thiserror::Error;

use crate::telemetry::Reading;

/// Why a line did not produce a reading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Blank line (or whitespace only)
    #[error("empty line")]
    Empty,

    /// Not delimited by `{` and `}`; boot banners, debug prints, etc.
    #[error("not a JSON object: {0:?}")]
    NotAnObject(String),

    /// Looked like an object but failed to decode
    #[error("malformed telemetry: {0}")]
    Malformed(String),
}

impl LineError {
    /// Whether the rejection should be surfaced to the user.
    ///
    /// Non-object lines are expected chatter and are dropped silently.
    pub fn is_notice(&self) -> bool {
        matches!(self, LineError::Malformed(_))
    }
}

/// Decode a single telemetry line
///
/// # Arguments
///
/// * `raw` - One line of text, with or without the trailing newline
///
/// # Returns
///
/// * `Result<Reading, LineError>` - Decoded reading, or why it was rejected
///
/// # Errors
///
/// Returns error if:
/// - The line is blank
/// - The trimmed line does not start with `{` and end with `}`
/// - The JSON is invalid, a field is missing, or a field has the wrong type
///
/// # Examples
///
/// ```
/// use vibration_monitor::protocol::decode_line;
///
/// let reading = decode_line(
///     r#"{"rpm": 3000, "angle": 90, "freq_fundamental": 50.0, "freq_harmonic": 150.0, "defect": false}"#,
/// ).unwrap();
/// assert_eq!(reading.rpm, 3000.0);
/// assert!(decode_line("{broken json").is_err());
/// ```
pub fn decode_line(raw: &str) -> Result<Reading, LineError> {
    let line = raw.trim();

    if line.is_empty() {
        return Err(LineError::Empty);
    }

    if !(line.starts_with('{') && line.ends_with('}')) {
        return Err(LineError::NotAnObject(line.to_string()));
    }

    serde_json::from_str::<Reading>(line).map_err(|e| LineError::Malformed(e.to_string()))
}
