//! Or-opt segment relocation, within and across routes.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive visits from one route to
//! any position of the same route or of another vehicle's route. A move is
//! a candidate when both touched routes stay within the distance bound and
//! the global objective (total distance plus weighted span) strictly drops.
//!
//! Removing `seg = v[s..s+k]` from a route with neighbours `prev`/`next`:
//!
//! ```text
//! removal   = c(prev, next) - c(prev, seg_first) - inner(seg) - c(seg_last, next)
//! insertion = c(p, seg_first) + inner(seg) + c(seg_last, q) - c(p, q)
//! ```
//!
//! For a move within one route the insertion arcs are read from the route
//! with the segment already taken out.
//!
//! The arcs dropped by a move always belong to a feasible route, so their
//! sum is exact. New distances are built as "what is kept" plus the added
//! arcs with saturating additions, so an overflowing candidate lands on
//! `i64::MAX` and is rejected by the bound.
//!
//! # Complexity
//!
//! O(n² × V) per segment length and pass, n = visits, V = vehicles.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use tracing::trace;

use super::objective_with;
use crate::evaluation::ArcCostEvaluator;
use crate::models::{RoutePosition, RoutingModel, Solution};

/// Longest segment Or-opt relocates.
pub const MAX_SEGMENT_LEN: usize = 3;

/// A segment relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrOptMove {
    /// Vehicle the segment is taken from.
    pub from_vehicle: usize,
    /// Index of the first moved visit in the source route.
    pub from_index: usize,
    /// Number of moved visits.
    pub segment_len: usize,
    /// Vehicle receiving the segment.
    pub to_vehicle: usize,
    /// Index of the first moved visit in the target route after the move.
    pub to_index: usize,
    /// Objective after the move.
    pub objective: i64,
}

/// Finds the move of a `segment_len` segment that lowers the objective most.
///
/// Candidates are scanned source route, source index, target route, target
/// index, in ascending order; ties keep the first one found.
pub fn best_or_opt(
    solution: &Solution,
    model: &RoutingModel,
    segment_len: usize,
) -> Option<OrOptMove> {
    let evaluator = model.evaluator();
    let dimension = model.dimension();
    let distances = solution.distances();
    let mut best: Option<OrOptMove> = None;
    let mut best_objective = solution.objective();

    for from in solution.routes() {
        let n = from.len();
        if n < segment_len || segment_len == 0 {
            continue;
        }
        let fv = from.vehicle_id();

        for s in 0..=(n - segment_len) {
            let seg = &from.visits()[s..s + segment_len];
            let first = seg[0];
            let last = seg[segment_len - 1];
            let inner = inner_cost(&evaluator, seg);
            let prev = from.position_at(s);
            let next = from.position_at(s + segment_len + 1);
            let dropped = evaluator
                .cost(prev, first)
                .saturating_add(inner)
                .saturating_add(evaluator.cost(last, next));
            let kept = distances[fv] - dropped;
            let bridge = evaluator.cost(prev, next);
            let inserted = |p: RoutePosition, q: RoutePosition| -> i64 {
                evaluator
                    .cost(p, first)
                    .saturating_add(inner)
                    .saturating_add(evaluator.cost(last, q))
            };

            for to in solution.routes() {
                let tv = to.vehicle_id();

                if tv == fv {
                    // Insertion slots in the route with the segment taken out.
                    let reduced_len = n - segment_len;
                    let reduced_at = |offset: usize| -> RoutePosition {
                        if offset <= s {
                            from.position_at(offset)
                        } else {
                            from.position_at(offset + segment_len)
                        }
                    };
                    for t in 0..=reduced_len {
                        if t == s {
                            continue;
                        }
                        let p = reduced_at(t);
                        let q = reduced_at(t + 1);
                        // (p, q) is an original arc of the route, not the bridge.
                        let new_distance = (kept - evaluator.cost(p, q))
                            .saturating_add(bridge)
                            .saturating_add(inserted(p, q));
                        if !dimension.is_feasible(new_distance) {
                            continue;
                        }
                        let objective = objective_with(dimension, &distances, &[(fv, new_distance)]);
                        if objective < best_objective {
                            best_objective = objective;
                            best = Some(OrOptMove {
                                from_vehicle: fv,
                                from_index: s,
                                segment_len,
                                to_vehicle: fv,
                                to_index: t,
                                objective,
                            });
                        }
                    }
                    continue;
                }

                let new_from = kept.saturating_add(bridge);
                if !dimension.is_feasible(new_from) {
                    continue;
                }
                for t in 0..=to.len() {
                    let p = to.position_at(t);
                    let q = to.position_at(t + 1);
                    let new_to = (distances[tv] - evaluator.cost(p, q)).saturating_add(inserted(p, q));
                    if !dimension.is_feasible(new_to) {
                        continue;
                    }
                    let objective =
                        objective_with(dimension, &distances, &[(fv, new_from), (tv, new_to)]);
                    if objective < best_objective {
                        best_objective = objective;
                        best = Some(OrOptMove {
                            from_vehicle: fv,
                            from_index: s,
                            segment_len,
                            to_vehicle: tv,
                            to_index: t,
                            objective,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Applies a move found by [`best_or_opt`].
pub fn apply_or_opt(solution: &mut Solution, model: &RoutingModel, mv: &OrOptMove) {
    let evaluator = model.evaluator();
    let routes = solution.routes_mut();
    let segment = routes[mv.from_vehicle].remove_segment(mv.from_index, mv.segment_len, &evaluator);
    routes[mv.to_vehicle].insert_segment(mv.to_index, &segment, &evaluator);
    solution.refresh_objective(model.dimension());
}

/// Runs one Or-opt pass: the best move for each segment length 1..=3.
///
/// Returns the objectives reached after each accepted move, in order.
pub fn or_opt_pass(solution: &mut Solution, model: &RoutingModel) -> Vec<i64> {
    let mut accepted = Vec::new();
    for segment_len in 1..=MAX_SEGMENT_LEN {
        if let Some(mv) = best_or_opt(solution, model, segment_len) {
            apply_or_opt(solution, model, &mv);
            debug_assert_eq!(solution.objective(), mv.objective);
            trace!(
                from = mv.from_vehicle,
                to = mv.to_vehicle,
                len = segment_len,
                objective = mv.objective,
                "or-opt accepted"
            );
            accepted.push(solution.objective());
        }
    }
    accepted
}

fn inner_cost(evaluator: &ArcCostEvaluator<'_>, segment: &[RoutePosition]) -> i64 {
    segment
        .windows(2)
        .fold(0i64, |acc, w| acc.saturating_add(evaluator.cost(w[0], w[1])))
}
