//! Speed-window correction and typical-speed statistics.
//!
//! Recorded trips usually begin and end with the vehicle creeping out of or
//! into a parking spot. Those low-speed runs say nothing about the route, so
//! the typical (median) speed is computed over a window that trims them off.
//!
//! The window is found by a two-pointer scan that walks inward from both ends
//! at the same pace. When no threshold on the ladder produces a window (slow,
//! congested trips), the full sequence is used and the result is flagged.
//!
//! ## Example
//! ```rust
//! use route_scorer::speed::{correct_speed_range, median_high, SpeedCorrectionConfig};
//!
//! let speeds = vec![0.0, 0.1, 12.0, 30.0, 25.0, 0.2, 0.0];
//! let window = correct_speed_range(&speeds, &SpeedCorrectionConfig::default()).unwrap();
//! assert_eq!((window.start, window.end), (2, 4));
//! assert_eq!(median_high(window.slice(&speeds)), Some(25.0));
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Default threshold ladder, tried in order.
pub const DEFAULT_THRESHOLDS: &[f64] = &[0.3, 0.25, 0.10, 0.03, 0.02];

/// Configuration for the speed-window correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedCorrectionConfig {
    /// Thresholds tried in order until one yields a window.
    /// Default: [0.3, 0.25, 0.10, 0.03, 0.02]
    pub thresholds: Vec<f64>,
}

impl Default for SpeedCorrectionConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

/// Inclusive index window `[start, end]` over a speed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedCorrection {
    pub start: usize,
    pub end: usize,
    /// Threshold that produced the window; `None` when every threshold on
    /// the ladder failed and the full range was used instead.
    pub threshold: Option<f64>,
}

impl SpeedCorrection {
    /// True when the ladder was exhausted and no trimming happened.
    pub fn is_fallback(&self) -> bool {
        self.threshold.is_none()
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A window always holds at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Borrow the windowed part of `speeds`.
    pub fn slice<'a>(&self, speeds: &'a [f64]) -> &'a [f64] {
        &speeds[self.start..=self.end]
    }
}

/// Run one rung of the ladder.
///
/// `i` walks forward and `j` backward in lockstep. The first time both a
/// front sample and a back sample at or above `threshold` have been seen, the
/// current `(i, j)` is returned. Returns `None` once the pointers cross.
pub fn scan_with_threshold(speeds: &[f64], threshold: f64) -> Option<(usize, usize)> {
    if speeds.is_empty() {
        return None;
    }

    let mut i = 0usize;
    let mut j = speeds.len() - 1;
    let mut front_found = false;
    let mut back_found = false;

    while i <= j {
        if !front_found && speeds[i] >= threshold {
            front_found = true;
        }
        if !back_found && speeds[j] >= threshold {
            back_found = true;
        }
        if front_found && back_found {
            return Some((i, j));
        }
        i += 1;
        if j == 0 {
            break;
        }
        j -= 1;
    }

    None
}

/// Find the window of `speeds` that excludes leading and trailing low-speed
/// runs, relaxing the threshold along the configured ladder.
///
/// Returns `None` only for an empty sequence. When every threshold fails the
/// full range `(0, len - 1)` is returned with `threshold == None`.
pub fn correct_speed_range(
    speeds: &[f64],
    config: &SpeedCorrectionConfig,
) -> Option<SpeedCorrection> {
    if speeds.is_empty() {
        return None;
    }

    for &threshold in &config.thresholds {
        if let Some((start, end)) = scan_with_threshold(speeds, threshold) {
            return Some(SpeedCorrection {
                start,
                end,
                threshold: Some(threshold),
            });
        }
        debug!(
            "[SpeedCorrector] No window at threshold {} over {} samples",
            threshold,
            speeds.len()
        );
    }

    warn!(
        "[SpeedCorrector] Threshold ladder exhausted over {} samples, using full range",
        speeds.len()
    );
    Some(SpeedCorrection {
        start: 0,
        end: speeds.len() - 1,
        threshold: None,
    })
}

/// Upper median: for an even count, the larger of the two middle values.
pub fn median_high(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}

/// Largest value, `None` for an empty slice.
pub fn max_speed(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_returns_current_positions() {
        // Front hit at 1, back hit at 3, but j has only reached 3 when i is 1
        let speeds = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(scan_with_threshold(&speeds, 0.3), Some((1, 3)));
    }

    #[test]
    fn test_scan_front_found_before_back() {
        // Front found at 0, back found when j reaches 4; i has advanced to 1
        let speeds = [5.0, 5.0, 5.0, 5.0, 5.0, 0.0];
        assert_eq!(scan_with_threshold(&speeds, 0.3), Some((1, 4)));
    }

    #[test]
    fn test_scan_crossing_fails() {
        // Only a front hit; back pointer never finds a sample before crossing
        let speeds = [5.0, 0.0, 0.0, 0.0];
        assert_eq!(scan_with_threshold(&speeds, 0.3), None);
    }

    #[test]
    fn test_single_sample() {
        assert_eq!(scan_with_threshold(&[1.0], 0.3), Some((0, 0)));
        assert_eq!(scan_with_threshold(&[0.0], 0.3), None);
    }

    #[test]
    fn test_ladder_relaxes() {
        let speeds = [0.0, 0.12, 0.15, 0.11, 0.0];
        let window = correct_speed_range(&speeds, &SpeedCorrectionConfig::default()).unwrap();
        assert_eq!(window.threshold, Some(0.10));
        assert_eq!((window.start, window.end), (1, 3));
        assert!(!window.is_fallback());
    }

    #[test]
    fn test_median_high() {
        assert_eq!(median_high(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median_high(&[4.0, 1.0, 3.0, 2.0]), Some(3.0));
        assert_eq!(median_high(&[]), None);
    }

    #[test]
    fn test_max_speed() {
        assert_eq!(max_speed(&[1.0, 7.5, 3.0]), Some(7.5));
        assert_eq!(max_speed(&[]), None);
    }
}
