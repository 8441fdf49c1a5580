//! Per-trajectory analysis.
//!
//! Turns an ordered list of samples into a [`TrajectorySummary`]:
//! - distance traveled, skipping pairs that start inside the geofence
//! - peak speed and upper-median speed over the corrected window
//! - stop clusters (zero-speed samples) and deceleration clusters
//!
//! Each analysis owns its accumulators and cluster maps, so trajectories can
//! be analyzed independently and in any order.

use log::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::clustering::EventClusters;
use crate::error::{OptionExt, Result, RouteScoreError};
use crate::geo_utils::geodesic_distance_miles;
use crate::speed::{correct_speed_range, max_speed, median_high};
use crate::{AnalysisConfig, Sample, TrajectorySummary};

/// A trajectory left out of a batch, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTrajectory {
    pub file_name: String,
    pub error: RouteScoreError,
}

/// Result of analyzing a batch of trajectories.
#[derive(Debug, Clone, Default)]
pub struct BatchAnalysis {
    /// Summaries in input order
    pub summaries: Vec<TrajectorySummary>,
    /// Trajectories that could not be analyzed, in input order
    pub skipped: Vec<SkippedTrajectory>,
}

/// Stop and deceleration clusters for one trajectory.
#[derive(Debug, Clone)]
struct EventCounts {
    stops: EventClusters,
    decelerations: EventClusters,
}

/// Distance in miles over consecutive pairs whose first point is outside the
/// geofence. Only the first point of each pair is tested.
fn accumulate_distance(samples: &[Sample], config: &AnalysisConfig) -> f64 {
    samples
        .windows(2)
        .filter(|pair| !config.geofence.contains(&pair[0].point()))
        .map(|pair| geodesic_distance_miles(&pair[0].point(), &pair[1].point()))
        .sum()
}

/// Scan every sample that has a successor. The final sample is only ever
/// the "next" half of a pair, so a stop there is not recorded.
fn cluster_events(samples: &[Sample], config: &AnalysisConfig) -> EventCounts {
    let mut stops = EventClusters::new(config.clustering);
    let mut decelerations = EventClusters::new(config.clustering);

    for pair in samples.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if current.speed == 0.0 {
            stops.record(current.point());
        }

        if next.speed + config.deceleration_delta < current.speed {
            decelerations.record(current.point());
        }
    }

    EventCounts {
        stops,
        decelerations,
    }
}

fn offset_stop_count(raw: usize, config: &AnalysisConfig) -> i64 {
    let stops = raw as i64 - config.stop_count_offset;
    if config.clamp_stop_count {
        stops.max(0)
    } else {
        stops
    }
}

/// Analyze one trajectory.
///
/// Fails with an input error for an empty trajectory or a sample with a
/// non-finite or out-of-range field. A single-sample trajectory succeeds with
/// zero distance and no clusters.
///
/// # Example
/// ```
/// use route_scorer::{analyze_trajectory, AnalysisConfig, Sample};
///
/// let samples = vec![
///     Sample::new(-77.60, 43.200, 0.0),
///     Sample::new(-77.60, 43.201, 20.0),
///     Sample::new(-77.60, 43.202, 35.0),
/// ];
/// let summary = analyze_trajectory(&samples, "trip", &AnalysisConfig::default()).unwrap();
/// assert_eq!(summary.max_speed, 35.0);
/// assert!(summary.total_distance > 0.0);
/// ```
pub fn analyze_trajectory(
    samples: &[Sample],
    file_name: &str,
    config: &AnalysisConfig,
) -> Result<TrajectorySummary> {
    if let Some((index, message)) = samples
        .iter()
        .enumerate()
        .find_map(|(i, s)| s.validation_error().map(|m| (i, m)))
    {
        return Err(RouteScoreError::InvalidSample {
            file_name: file_name.to_string(),
            index,
            message,
        });
    }

    let speeds: Vec<f64> = samples.iter().map(|s| s.speed).collect();

    let max_speed = max_speed(&speeds).ok_or_empty(file_name)?;
    let speed_window =
        correct_speed_range(&speeds, &config.speed_correction).ok_or_empty(file_name)?;
    let median_speed = median_high(speed_window.slice(&speeds)).ok_or_empty(file_name)?;

    let total_distance = accumulate_distance(samples, config);
    let events = cluster_events(samples, config);

    let raw_stop_clusters = events.stops.len();
    let summary = TrajectorySummary {
        file_name: file_name.to_string(),
        total_distance,
        max_speed,
        median_speed,
        stops: offset_stop_count(raw_stop_clusters, config),
        raw_stop_clusters,
        no_times_deceleration: events.decelerations.len(),
        speed_window,
        sample_count: samples.len(),
    };

    debug!(
        "[TrajectoryAnalyzer] {}: {:.3} mi, max {:.2}, median {:.2}, {} stops ({} clusters), {} decelerations{}",
        summary.file_name,
        summary.total_distance,
        summary.max_speed,
        summary.median_speed,
        summary.stops,
        summary.raw_stop_clusters,
        summary.no_times_deceleration,
        if speed_window.is_fallback() {
            ", speed window fallback"
        } else {
            ""
        }
    );

    Ok(summary)
}

fn collect_batch(results: Vec<(String, Result<TrajectorySummary>)>) -> BatchAnalysis {
    let mut batch = BatchAnalysis::default();
    for (file_name, result) in results {
        match result {
            Ok(summary) => batch.summaries.push(summary),
            Err(error) => {
                warn!("[TrajectoryAnalyzer] Skipping {}: {}", file_name, error);
                batch.skipped.push(SkippedTrajectory { file_name, error });
            }
        }
    }
    info!(
        "[TrajectoryAnalyzer] Analyzed {} trajectories, skipped {}",
        batch.summaries.len(),
        batch.skipped.len()
    );
    batch
}

/// Analyze trajectories one after another, in input order.
///
/// A trajectory that fails is skipped with its reason; the rest continue.
pub fn analyze_batch(
    trajectories: &[(String, Vec<Sample>)],
    config: &AnalysisConfig,
) -> BatchAnalysis {
    let results = trajectories
        .iter()
        .map(|(name, samples)| (name.clone(), analyze_trajectory(samples, name, config)))
        .collect();
    collect_batch(results)
}

/// Parallel version of [`analyze_batch`]. Output order matches input order.
#[cfg(feature = "parallel")]
pub fn analyze_batch_parallel(
    trajectories: &[(String, Vec<Sample>)],
    config: &AnalysisConfig,
) -> BatchAnalysis {
    let results = trajectories
        .par_iter()
        .map(|(name, samples)| (name.clone(), analyze_trajectory(samples, name, config)))
        .collect();
    collect_batch(results)
}

/// Analyzer bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryAnalyzer {
    config: AnalysisConfig,
}

impl TrajectoryAnalyzer {
    /// Create an analyzer, rejecting an unusable configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, samples: &[Sample], file_name: &str) -> Result<TrajectorySummary> {
        analyze_trajectory(samples, file_name, &self.config)
    }

    pub fn analyze_batch(&self, trajectories: &[(String, Vec<Sample>)]) -> BatchAnalysis {
        analyze_batch(trajectories, &self.config)
    }

    #[cfg(feature = "parallel")]
    pub fn analyze_batch_parallel(&self, trajectories: &[(String, Vec<Sample>)]) -> BatchAnalysis {
        analyze_batch_parallel(trajectories, &self.config)
    }
}
