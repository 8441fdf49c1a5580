//! Unified error handling for the route-scorer library.
//!
//! Errors fall into two classes that callers usually treat differently:
//! input errors (a trajectory that cannot be analyzed at all) and degenerate
//! trajectories (a summary that exists but cannot be scored). Batch entry
//! points skip the offending trajectory and keep going; the single-trajectory
//! functions return the error.

use thiserror::Error;

/// Unified error type for route-scorer operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteScoreError {
    /// Trajectory has no samples
    #[error("Trajectory '{file_name}' has no samples")]
    EmptyTrajectory { file_name: String },

    /// A sample carries a non-finite coordinate or speed
    #[error("Trajectory '{file_name}' has an invalid sample at index {index}: {message}")]
    InvalidSample {
        file_name: String,
        index: usize,
        message: String,
    },

    /// A `longitude,latitude,speed` tuple could not be parsed
    #[error("Malformed coordinate tuple on line {line}: {message}")]
    MalformedTuple { line: usize, message: String },

    /// Summary cannot be scored (zero distance or zero median speed)
    #[error("Trajectory '{file_name}' cannot be scored: {reason}")]
    DegenerateTrajectory { file_name: String, reason: String },

    /// None of the supplied summaries could be scored
    #[error("No scorable trajectories ({skipped} skipped)")]
    NoScorableTrajectories { skipped: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl RouteScoreError {
    /// Whether this error belongs to the input class (bad or empty samples).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RouteScoreError::EmptyTrajectory { .. }
                | RouteScoreError::InvalidSample { .. }
                | RouteScoreError::MalformedTuple { .. }
        )
    }
}

impl From<serde_json::Error> for RouteScoreError {
    fn from(err: serde_json::Error) -> Self {
        RouteScoreError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for route-scorer operations.
pub type Result<T> = std::result::Result<T, RouteScoreError>;

/// Extension trait for converting Option to RouteScoreError.
pub trait OptionExt<T> {
    /// Convert Option to Result with an empty trajectory error.
    fn ok_or_empty(self, file_name: &str) -> Result<T>;

    /// Convert Option to Result with a degenerate trajectory error.
    fn ok_or_degenerate(self, file_name: &str, reason: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_empty(self, file_name: &str) -> Result<T> {
        self.ok_or_else(|| RouteScoreError::EmptyTrajectory {
            file_name: file_name.to_string(),
        })
    }

    fn ok_or_degenerate(self, file_name: &str, reason: &str) -> Result<T> {
        self.ok_or_else(|| RouteScoreError::DegenerateTrajectory {
            file_name: file_name.to_string(),
            reason: reason.to_string(),
        })
    }
}
