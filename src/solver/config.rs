//! Solver configuration.

use std::time::Duration;

use serde::Deserialize;

/// Work budget and execution options for [`Solver`](super::Solver).
///
/// Local search stops at whichever limit is reached first. Every field has a
/// default, so a partial document deserializes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use md_routing::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_iterations(50)
///     .with_time_limit(Duration::from_secs(2))
///     .with_parallel(true);
/// assert_eq!(config.max_iterations, 50);
/// assert_eq!(config.time_limit, Some(Duration::from_secs(2)));
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of local search passes.
    pub max_iterations: usize,
    /// Wall-clock limit for the whole solve.
    pub time_limit: Option<Duration>,
    /// Evaluate 2-opt candidates of different routes on the rayon pool.
    pub parallel: bool,
}

impl SolverConfig {
    /// Default pass budget.
    pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;

    /// Sets the maximum number of local search passes.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets a wall-clock limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            time_limit: None,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_iterations, 1_000);
        assert!(config.time_limit.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SolverConfig =
            serde_json::from_str(r#"{ "max_iterations": 7 }"#).expect("valid json");
        assert_eq!(config, SolverConfig::default().with_max_iterations(7));

        let config: SolverConfig = serde_json::from_str(
            r#"{ "time_limit": { "secs": 3, "nanos": 0 }, "parallel": true }"#,
        )
        .expect("valid json");
        assert_eq!(config.time_limit, Some(Duration::from_secs(3)));
        assert!(config.parallel);
    }
}
