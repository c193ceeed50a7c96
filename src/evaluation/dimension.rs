//! Cumulative distance dimension.
//!
//! Tracks the distance accumulated from a vehicle's start along its route,
//! enforces the per-route upper bound, and prices the imbalance between the
//! longest and shortest route.
//!
//! The start cumul is fixed at zero and the dimension has no slack, so the
//! cumul at offset `k` is exactly the transit cost of the first `k` arcs.
//!
//! Sums saturate at `i64::MAX`. A saturated distance stands for an overflow
//! and is never feasible, whatever the bound.

use super::ArcCostEvaluator;
use crate::models::RoutePosition;

/// Default dimension name.
pub const DISTANCE_DIMENSION: &str = "Distance";

/// The distance dimension configuration.
///
/// # Examples
///
/// ```
/// use md_routing::evaluation::DistanceDimension;
///
/// let dim = DistanceDimension::new(2000, 100);
/// assert_eq!(dim.name(), "Distance");
/// assert!(dim.is_feasible(2000));
/// assert!(!dim.is_feasible(2001));
///
/// // 30 + 50 + 20, plus 100 × (50 − 20)
/// assert_eq!(dim.objective(&[30, 50, 20]), 100 + 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceDimension {
    name: String,
    upper_bound: i64,
    span_cost_coefficient: i64,
}

impl DistanceDimension {
    /// Creates a dimension with a per-route upper bound and span coefficient.
    pub fn new(upper_bound: u64, span_cost_coefficient: u64) -> Self {
        Self {
            name: DISTANCE_DIMENSION.to_string(),
            upper_bound: saturate(upper_bound),
            span_cost_coefficient: saturate(span_cost_coefficient),
        }
    }

    /// A dimension with no effective bound and no span cost.
    pub fn unbounded() -> Self {
        Self::new(u64::MAX, 0)
    }

    /// Sets the dimension name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Dimension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum cumulative distance of a single route.
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound
    }

    /// Weight applied to `max − min` route distance in the objective.
    pub fn span_cost_coefficient(&self) -> i64 {
        self.span_cost_coefficient
    }

    /// Returns `true` if a route of this distance respects the bound.
    ///
    /// `i64::MAX` is the saturated value of an overflowing sum and is
    /// rejected even by an unbounded dimension.
    #[inline]
    pub fn is_feasible(&self, distance: i64) -> bool {
        distance < i64::MAX && distance <= self.upper_bound
    }

    /// `max − min` over the given route distances (zero when empty).
    pub fn span(&self, distances: &[i64]) -> i64 {
        let max = distances.iter().copied().max().unwrap_or(0);
        let min = distances.iter().copied().min().unwrap_or(0);
        max - min
    }

    /// Global objective: total distance plus the weighted span.
    pub fn objective(&self, distances: &[i64]) -> i64 {
        let total = distances.iter().fold(0i64, |acc, &d| acc.saturating_add(d));
        total.saturating_add(self.span_cost_coefficient.saturating_mul(self.span(distances)))
    }
}

fn saturate(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Cumulative distance at every offset of one route.
///
/// Offset `0` is the vehicle's start, offsets `1..=len` are the visits and
/// offset `len + 1` is the vehicle's end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCumuls {
    values: Vec<i64>,
}

impl RouteCumuls {
    /// Computes all cumuls of `start → visits… → end`. O(route length).
    pub fn compute(
        evaluator: &ArcCostEvaluator<'_>,
        start: RoutePosition,
        visits: &[RoutePosition],
        end: RoutePosition,
    ) -> Self {
        let mut cumuls = Self {
            values: vec![0; visits.len() + 2],
        };
        cumuls.recompute_from(evaluator, start, visits, end, 1);
        cumuls
    }

    /// Recomputes the cumuls from `offset` onward after the route changed.
    ///
    /// Everything before `offset` must still be valid. The buffer is resized
    /// to the new route length.
    pub fn recompute_from(
        &mut self,
        evaluator: &ArcCostEvaluator<'_>,
        start: RoutePosition,
        visits: &[RoutePosition],
        end: RoutePosition,
        offset: usize,
    ) {
        let last = visits.len() + 1;
        self.values.resize(last + 1, 0);
        self.values[0] = 0;

        let at = |k: usize| -> RoutePosition {
            if k == 0 {
                start
            } else if k == last {
                end
            } else {
                visits[k - 1]
            }
        };

        for k in offset.max(1)..=last {
            self.values[k] = self.values[k - 1].saturating_add(evaluator.cost(at(k - 1), at(k)));
        }
    }

    /// Cumulative distance at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the route end.
    #[inline]
    pub fn at(&self, offset: usize) -> i64 {
        self.values[offset]
    }

    /// Total route distance (cumul at the end).
    #[inline]
    pub fn total(&self) -> i64 {
        self.values.last().copied().unwrap_or(0)
    }

    /// All cumuls, start to end.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }
}
