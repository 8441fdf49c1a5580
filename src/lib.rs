//! # Route Scorer
//!
//! Trajectory analysis and path selection for recorded vehicle trips.
//!
//! This library provides:
//! - Geodesic distance accumulation outside a parking-area geofence
//! - Peak and typical (upper-median) speed over a noise-trimmed window
//! - Stop and deceleration counting with proximity clustering
//! - Weighted cost scoring to select the best of several trips
//! - Parallel batch analysis
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch analysis with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use route_scorer::{analyze_trajectory, select_best, AnalysisConfig, CostWeights, Sample};
//!
//! let trip: Vec<Sample> = (0..20)
//!     .map(|i| Sample::new(-77.60, 43.20 + i as f64 * 0.001, if i % 7 == 0 { 0.0 } else { 30.0 }))
//!     .collect();
//!
//! let summary = analyze_trajectory(&trip, "trip-a", &AnalysisConfig::default()).unwrap();
//! let best = select_best(&[summary], &CostWeights::default()).unwrap();
//! println!("Best path {} with cost {:.4}", best.file_name, best.cost);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, RouteScoreError};

// Geographic utilities (geodesic distance, geofence)
pub mod geo_utils;
pub use geo_utils::Geofence;

// Speed-window correction and median
pub mod speed;
pub use speed::{correct_speed_range, median_high, SpeedCorrection, SpeedCorrectionConfig};

// Stop/deceleration proximity clustering
pub mod clustering;
pub use clustering::{AxisOrder, ClusterConfig, ClusterHit, EventClusters};

// Per-trajectory analysis
pub mod analysis;
#[cfg(feature = "parallel")]
pub use analysis::analyze_batch_parallel;
pub use analysis::{
    analyze_batch, analyze_trajectory, BatchAnalysis, SkippedTrajectory, TrajectoryAnalyzer,
};

// Cost scoring and best-path selection
pub mod scoring;
pub use scoring::{path_cost, score_paths, select_best, CostWeights, PathCost, ScoreReport};

// Coordinate tuple parsing
pub mod parse;
pub use parse::{parse_samples, parse_tuple};

// Algorithm toolbox - flat access to the standalone algorithms
pub mod algorithms;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use route_scorer::GpsPoint;
/// let point = GpsPoint::new(43.0861, -77.6800); // Rochester, NY
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// One recorded trajectory sample.
///
/// Field order follows the recorded tuples: longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Speed, one unit throughout a trajectory (mph in recorded trips)
    pub speed: f64,
}

impl Sample {
    pub fn new(longitude: f64, latitude: f64, speed: f64) -> Self {
        Self {
            longitude,
            latitude,
            speed,
        }
    }

    /// Position of this sample.
    pub fn point(&self) -> GpsPoint {
        GpsPoint::new(self.latitude, self.longitude)
    }

    /// Describe why this sample cannot be analyzed, if it cannot.
    pub fn validation_error(&self) -> Option<String> {
        if !self.point().is_valid() {
            return Some(format!(
                "coordinate ({}, {}) is not a valid longitude/latitude",
                self.longitude, self.latitude
            ));
        }
        if !self.speed.is_finite() {
            return Some(format!("speed {} is not finite", self.speed));
        }
        None
    }
}

/// Summary statistics for one analyzed trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    /// Identifier of the source trajectory
    pub file_name: String,
    /// Distance traveled outside the geofence, in miles
    pub total_distance: f64,
    /// Highest sample speed
    pub max_speed: f64,
    /// Upper median over the corrected speed window
    pub median_speed: f64,
    /// Stop clusters minus the configured offset. May be negative.
    pub stops: i64,
    /// Stop clusters before the offset is applied
    pub raw_stop_clusters: usize,
    /// Distinct deceleration clusters
    pub no_times_deceleration: usize,
    /// Window the median was computed over
    pub speed_window: SpeedCorrection,
    /// Number of samples analyzed
    pub sample_count: usize,
}

impl TrajectorySummary {
    /// Distance over median speed (hours when speeds are mph).
    /// `None` when the median speed is zero.
    pub fn travel_time(&self) -> Option<f64> {
        if self.median_speed > 0.0 {
            Some(self.total_distance / self.median_speed)
        } else {
            None
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Calibration for trajectory analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Exclusion zone for distance accumulation.
    /// Default: 2 miles around the RIT parking area
    pub geofence: Geofence,

    /// Threshold ladder for trimming low-speed ends.
    pub speed_correction: SpeedCorrectionConfig,

    /// Merge radius and axis order for stop/deceleration clusters.
    pub clustering: ClusterConfig,

    /// Subtracted from the stop-cluster count to discount the start and end
    /// of the trip. Applied unconditionally unless `clamp_stop_count` is set,
    /// so trips with fewer clusters report a negative count.
    /// Default: 2
    pub stop_count_offset: i64,

    /// Clamp the offset stop count at zero.
    /// Default: false
    pub clamp_stop_count: bool,

    /// Minimum drop in speed between consecutive samples that counts as a
    /// deceleration. Default: 0.05
    pub deceleration_delta: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            geofence: Geofence::default(),
            speed_correction: SpeedCorrectionConfig::default(),
            clustering: ClusterConfig::default(),
            stop_count_offset: 2,
            clamp_stop_count: false,
            deceleration_delta: 0.05,
        }
    }
}

impl AnalysisConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject calibrations the analyzer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.speed_correction.thresholds.is_empty() {
            return Err(config_error("speed correction threshold ladder is empty"));
        }
        if self
            .speed_correction
            .thresholds
            .iter()
            .any(|t| !t.is_finite())
        {
            return Err(config_error("speed correction thresholds must be finite"));
        }
        if !self.geofence.center.is_valid() {
            return Err(config_error("geofence center is not a valid coordinate"));
        }
        if !is_non_negative(self.geofence.radius_miles) {
            return Err(config_error("geofence radius must be non-negative"));
        }
        if !is_non_negative(self.clustering.radius_km) {
            return Err(config_error("cluster radius must be non-negative"));
        }
        if !is_non_negative(self.deceleration_delta) {
            return Err(config_error("deceleration delta must be non-negative"));
        }
        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub(crate) fn config_error(message: &str) -> RouteScoreError {
    RouteScoreError::Config {
        message: message.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
