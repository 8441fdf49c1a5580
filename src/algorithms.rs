//! # Algorithm Toolbox
//!
//! Direct access to the standalone trajectory algorithms, for callers that
//! want one piece without going through [`crate::TrajectoryAnalyzer`].
//!
//! ## Core Algorithms
//!
//! - **Speed Correction**: two-pointer low-speed trimming with a threshold ladder
//! - **Upper Median**: median-high over a speed window
//! - **Event Clustering**: exact-then-proximity merging of stop/deceleration events
//! - **Path Cost**: weighted time, stop density and speed spread
//!
//! ## Geographic Utilities
//!
//! - **Geodesic Distance**: ellipsoidal distance between GPS points
//! - **Polyline Length**: total geodesic length of a path
//! - **Geofence**: fixed-radius containment test
//!
//! # Example
//!
//! ```rust
//! use route_scorer::algorithms::{geodesic_distance_miles, scan_with_threshold, GpsPoint};
//!
//! let rit = GpsPoint::new(43.0861, -77.6800);
//! let downtown = GpsPoint::new(43.1566, -77.6088);
//! println!("RIT to downtown: {:.1} mi", geodesic_distance_miles(&rit, &downtown));
//!
//! assert_eq!(scan_with_threshold(&[0.0, 5.0, 6.0, 0.0], 0.3), Some((1, 2)));
//! ```

// =============================================================================
// Core Types (re-exported from lib)
// =============================================================================

pub use crate::{AnalysisConfig, GpsPoint, Sample, TrajectorySummary};

// =============================================================================
// Geographic Utilities
// =============================================================================

pub use crate::geo_utils::{
    geodesic_distance_km, geodesic_distance_meters, geodesic_distance_miles, is_within_fence,
    polyline_length_miles, Geofence,
};

// =============================================================================
// Speed Correction
// =============================================================================

/// Window selection over a speed sequence.
pub use crate::speed::{correct_speed_range, scan_with_threshold, SpeedCorrection};
/// Threshold ladder configuration
pub use crate::speed::SpeedCorrectionConfig;
/// Summary statistics over a speed window
pub use crate::speed::{max_speed, median_high};

// =============================================================================
// Event Clustering
// =============================================================================

pub use crate::clustering::{AxisOrder, ClusterConfig, ClusterHit, EventClusters};

// =============================================================================
// Scoring
// =============================================================================

pub use crate::scoring::{path_cost, CostWeights};
