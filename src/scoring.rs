//! Cost scoring and best-path selection.
//!
//! Each summary is reduced to one cost:
//!
//! ```text
//! time = total_distance / median_speed
//! cost = time_weight         * (time / reference_duration)
//!      + stop_weight         * (stops / total_distance)
//!      + speed_spread_weight * ((max_speed - median_speed) / reference_speed_delta)
//! ```
//!
//! Lower is better. Ties keep the first summary seen.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::SkippedTrajectory;
use crate::error::{Result, RouteScoreError};
use crate::{config_error, TrajectorySummary};

/// Weights and normalizers of the cost function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Weight of normalized trip time. Default: 3/5
    pub time_weight: f64,
    /// Weight of stops per mile. Default: 1/5
    pub stop_weight: f64,
    /// Weight of the normalized max-minus-median speed spread. Default: 1/5
    pub speed_spread_weight: f64,
    /// Reference trip duration the time term is divided by. Default: 30.0
    pub reference_duration: f64,
    /// Reference speed delta (mph) the spread term is divided by. Default: 52.13
    pub reference_speed_delta: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            time_weight: 3.0 / 5.0,
            stop_weight: 1.0 / 5.0,
            speed_spread_weight: 1.0 / 5.0,
            reference_duration: 30.0,
            reference_speed_delta: 52.13,
        }
    }
}

impl CostWeights {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let weights: Self = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.time_weight,
            self.stop_weight,
            self.speed_spread_weight,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(config_error("cost weights must be finite"));
        }
        if !is_positive(self.reference_duration) {
            return Err(config_error("reference duration must be positive"));
        }
        if !is_positive(self.reference_speed_delta) {
            return Err(config_error("reference speed delta must be positive"));
        }
        Ok(())
    }
}

/// Cost of one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCost {
    pub file_name: String,
    pub cost: f64,
}

/// Costs for a batch of summaries.
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    /// Costs of scorable summaries, in input order
    pub costs: Vec<PathCost>,
    /// Summaries that could not be scored, in input order
    pub skipped: Vec<SkippedTrajectory>,
    /// Lowest cost, first seen on ties
    pub best: Option<PathCost>,
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn degenerate(summary: &TrajectorySummary, reason: &str) -> RouteScoreError {
    RouteScoreError::DegenerateTrajectory {
        file_name: summary.file_name.clone(),
        reason: reason.to_string(),
    }
}

/// Cost of one summary.
///
/// A zero (or negative) distance or median speed would divide by zero, so it
/// is reported as a degenerate trajectory instead of producing NaN.
pub fn path_cost(summary: &TrajectorySummary, weights: &CostWeights) -> Result<f64> {
    if !is_positive(summary.total_distance) {
        return Err(degenerate(summary, "total distance is zero"));
    }
    if !is_positive(summary.median_speed) {
        return Err(degenerate(summary, "median speed is zero"));
    }

    let time = summary.total_distance / summary.median_speed;
    let cost = weights.time_weight * (time / weights.reference_duration)
        + weights.stop_weight * (summary.stops as f64 / summary.total_distance)
        + weights.speed_spread_weight
            * ((summary.max_speed - summary.median_speed) / weights.reference_speed_delta);

    if !cost.is_finite() {
        return Err(degenerate(summary, "cost is not finite"));
    }
    Ok(cost)
}

/// Score every summary and pick the cheapest.
pub fn score_paths(summaries: &[TrajectorySummary], weights: &CostWeights) -> ScoreReport {
    let mut report = ScoreReport::default();

    for summary in summaries {
        match path_cost(summary, weights) {
            Ok(cost) => {
                debug!("[PathScorer] {} cost {:.6}", summary.file_name, cost);
                let candidate = PathCost {
                    file_name: summary.file_name.clone(),
                    cost,
                };
                let is_better = report.best.as_ref().map_or(true, |best| cost < best.cost);
                if is_better {
                    report.best = Some(candidate.clone());
                }
                report.costs.push(candidate);
            }
            Err(error) => {
                warn!("[PathScorer] Skipping {}: {}", summary.file_name, error);
                report.skipped.push(SkippedTrajectory {
                    file_name: summary.file_name.clone(),
                    error,
                });
            }
        }
    }

    if let Some(best) = &report.best {
        info!(
            "[PathScorer] Best path {} with cost {:.6} ({} scored, {} skipped)",
            best.file_name,
            best.cost,
            report.costs.len(),
            report.skipped.len()
        );
    }

    report
}

/// Select the minimum-cost trajectory.
///
/// Fails only when no summary can be scored.
///
/// # Example
/// ```
/// use route_scorer::{analyze_trajectory, select_best, AnalysisConfig, CostWeights, Sample};
///
/// let fast: Vec<Sample> = (0..10).map(|i| Sample::new(-77.6, 43.3 + i as f64 * 0.01, 40.0)).collect();
/// let slow: Vec<Sample> = (0..10).map(|i| Sample::new(-77.6, 43.3 + i as f64 * 0.01, 20.0)).collect();
///
/// let config = AnalysisConfig::default();
/// let summaries = vec![
///     analyze_trajectory(&slow, "slow", &config).unwrap(),
///     analyze_trajectory(&fast, "fast", &config).unwrap(),
/// ];
/// let best = select_best(&summaries, &CostWeights::default()).unwrap();
/// assert_eq!(best.file_name, "fast");
/// ```
pub fn select_best(summaries: &[TrajectorySummary], weights: &CostWeights) -> Result<PathCost> {
    let report = score_paths(summaries, weights);
    let skipped = report.skipped.len();
    report
        .best
        .ok_or(RouteScoreError::NoScorableTrajectories { skipped })
}
