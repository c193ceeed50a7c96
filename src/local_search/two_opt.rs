//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For a route `start, v[0], …, v[n-1], end` and indices `i < j`, reversing
//! `v[i..=j]` replaces the arcs `prev → v[i]` and `v[j] → next` by
//! `prev → v[j]` and `v[i] → next`, and flips the direction of every arc
//! inside the segment. Costs may be asymmetric, so the reversed inner cost is
//! accumulated alongside the forward one while `j` grows:
//!
//! ```text
//! delta = c(prev, v[j]) + rev(i..=j) + c(v[i], next)
//!       - c(prev, v[i]) - fwd(i..=j) - c(v[j], next)
//! ```
//!
//! Arc sums saturate; a saturated new cost never yields an improving delta.
//!
//! The best reversal of each route is evaluated independently against a
//! snapshot of the solution (optionally on the rayon pool). Acceptance is
//! serialized in vehicle order and re-checks the global objective, which
//! includes the span cost, against the current state.
//!
//! # Complexity
//!
//! O(n²) per route and pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rayon::prelude::*;
use tracing::trace;

use super::objective_with;
use crate::evaluation::ArcCostEvaluator;
use crate::models::{Route, RoutingModel, Solution};

/// A segment reversal within one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    /// Vehicle whose route is changed.
    pub vehicle: usize,
    /// First reversed visit index.
    pub i: usize,
    /// Last reversed visit index.
    pub j: usize,
    /// Change of the route distance (negative when improving).
    pub delta: i64,
}

/// Finds the reversal that shortens `route` the most, if any.
///
/// Only reversals keeping the route within `upper_bound` are considered.
/// Ties keep the first `(i, j)` in lexicographic order.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
/// use md_routing::evaluation::DistanceDimension;
/// use md_routing::models::{Fleet, Route, RoutingModel};
/// use md_routing::local_search::best_two_opt;
///
/// let rows = (0..4i64).map(|i| (0..4i64).map(|j| (i - j).abs()).collect()).collect();
/// let model = RoutingModel::new(
///     CostMatrix::from_rows(rows).unwrap(),
///     Fleet::uniform(1, 0, 0).unwrap(),
///     DistanceDimension::new(100, 0),
/// ).unwrap();
/// let eval = model.evaluator();
/// let m = model.manager();
/// let p = |loc: usize| m.positions_for(loc)[0];
///
/// // 0 → 3 → 2 → 1 → 0 is already optimal on a line, 0 → 2 → 1 → 3 → 0 is not.
/// let route = Route::from_visits(0, m.start(0), m.end(0), vec![p(2), p(1), p(3)], &eval);
/// let mv = best_two_opt(&route, &eval, 100).unwrap();
/// assert_eq!(route.distance() + mv.delta, 6);
/// ```
pub fn best_two_opt(
    route: &Route,
    evaluator: &ArcCostEvaluator<'_>,
    upper_bound: i64,
) -> Option<TwoOptMove> {
    let visits = route.visits();
    let n = visits.len();
    if n < 2 {
        return None;
    }

    let mut best: Option<TwoOptMove> = None;

    for i in 0..n - 1 {
        let prev = route.position_at(i);
        let first = visits[i];
        let mut fwd = 0i64;
        let mut rev = 0i64;

        for j in i + 1..n {
            fwd = fwd.saturating_add(evaluator.cost(visits[j - 1], visits[j]));
            rev = rev.saturating_add(evaluator.cost(visits[j], visits[j - 1]));
            let next = route.position_at(j + 2);

            let old_cost = evaluator
                .cost(prev, first)
                .saturating_add(fwd)
                .saturating_add(evaluator.cost(visits[j], next));
            let new_cost = evaluator
                .cost(prev, visits[j])
                .saturating_add(rev)
                .saturating_add(evaluator.cost(first, next));
            let delta = new_cost - old_cost;

            if delta < 0
                && route.distance() + delta <= upper_bound
                && best.is_none_or(|b| delta < b.delta)
            {
                best = Some(TwoOptMove {
                    vehicle: route.vehicle_id(),
                    i,
                    j,
                    delta,
                });
            }
        }
    }

    best
}

/// Runs one 2-opt pass over every route of `solution`.
///
/// Returns the objectives reached after each accepted reversal, in order.
pub fn two_opt_pass(solution: &mut Solution, model: &RoutingModel, parallel: bool) -> Vec<i64> {
    let evaluator = model.evaluator();
    let dimension = model.dimension();
    let upper_bound = dimension.upper_bound();

    let candidates: Vec<Option<TwoOptMove>> = if parallel {
        solution
            .routes()
            .par_iter()
            .map(|route| best_two_opt(route, &evaluator, upper_bound))
            .collect()
    } else {
        solution
            .routes()
            .iter()
            .map(|route| best_two_opt(route, &evaluator, upper_bound))
            .collect()
    };

    let mut accepted = Vec::new();
    for mv in candidates.into_iter().flatten() {
        let distances = solution.distances();
        let new_distance = distances[mv.vehicle] + mv.delta;
        let objective = objective_with(dimension, &distances, &[(mv.vehicle, new_distance)]);
        if objective >= solution.objective() {
            continue;
        }

        solution.routes_mut()[mv.vehicle].reverse(mv.i, mv.j, &evaluator);
        solution.refresh_objective(dimension);
        debug_assert_eq!(solution.objective(), objective);
        trace!(vehicle = mv.vehicle, i = mv.i, j = mv.j, objective, "2-opt accepted");
        accepted.push(objective);
    }

    accepted
}
