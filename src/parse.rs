//! Parsing of `longitude,latitude,speed` coordinate tuples.
//!
//! Recorded trips carry one tuple per line inside a coordinates block. Locating
//! that block in its container file is the caller's job; this module turns the
//! block's text into validated samples.

use crate::error::{Result, RouteScoreError};
use crate::Sample;

fn malformed(line: usize, message: String) -> RouteScoreError {
    RouteScoreError::MalformedTuple { line, message }
}

fn parse_field(field: Option<&str>, name: &str, line: usize) -> Result<f64> {
    let raw = field
        .map(str::trim)
        .ok_or_else(|| malformed(line, format!("missing {}", name)))?;
    raw.parse::<f64>()
        .map_err(|e| malformed(line, format!("{} '{}': {}", name, raw, e)))
}

/// Parse one tuple. `line` is only used for error reporting.
///
/// Fields past the third are ignored.
pub fn parse_tuple(text: &str, line: usize) -> Result<Sample> {
    let mut fields = text.trim().split(',');
    let longitude = parse_field(fields.next(), "longitude", line)?;
    let latitude = parse_field(fields.next(), "latitude", line)?;
    let speed = parse_field(fields.next(), "speed", line)?;
    Ok(Sample::new(longitude, latitude, speed))
}

/// Parse a block of newline-separated tuples, skipping blank lines.
/// Line numbers in errors are 1-based.
///
/// # Example
/// ```
/// use route_scorer::parse_samples;
///
/// let samples = parse_samples("-77.68,43.08,0\n-77.67,43.09,12.5\n").unwrap();
/// assert_eq!(samples.len(), 2);
/// assert_eq!(samples[1].speed, 12.5);
/// ```
pub fn parse_samples(text: &str) -> Result<Vec<Sample>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_tuple(line, i + 1))
        .collect()
}
