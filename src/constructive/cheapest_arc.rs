//! Path-cheapest-arc constructive heuristic.
//!
//! Every vehicle grows its route from its start. At each step the globally
//! cheapest arc `frontier → unrouted visit` over all vehicles is committed,
//! provided the route closed back to the vehicle's end stays within the
//! distance bound. Ties go to the lowest location, then the lowest vehicle.
//!
//! # Complexity
//!
//! O(K² × V) where K = visits and V = vehicles.

use tracing::{debug, trace};

use crate::error::{RoutingError, RoutingResult};
use crate::models::{Route, RoutePosition, RoutingModel, Solution};

/// Constructs an initial feasible solution with path cheapest arc.
///
/// Fails with [`RoutingError::InfeasibleProblem`] if some vehicle's bare
/// `start → end` route already exceeds the bound, or if at some step no
/// remaining visit can be appended to any route without exceeding it.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
/// use md_routing::evaluation::DistanceDimension;
/// use md_routing::models::{Fleet, RoutingModel};
/// use md_routing::constructive::path_cheapest_arc;
///
/// // Locations on a line at 0, 1, 2, 3; one vehicle from 0 back to 0.
/// let rows = (0..4i64).map(|i| (0..4i64).map(|j| (i - j).abs()).collect()).collect();
/// let matrix = CostMatrix::from_rows(rows).unwrap();
/// let fleet = Fleet::uniform(1, 0, 0).unwrap();
/// let model = RoutingModel::new(matrix, fleet, DistanceDimension::new(100, 0)).unwrap();
///
/// let solution = path_cheapest_arc(&model).unwrap();
/// assert_eq!(solution.route(0).locations(model.manager()), vec![0, 1, 2, 3, 0]);
/// assert_eq!(solution.objective(), 6);
/// ```
pub fn path_cheapest_arc(model: &RoutingModel) -> RoutingResult<Solution> {
    let evaluator = model.evaluator();
    let manager = model.manager();
    let dimension = model.dimension();
    let num_visits = manager.num_visits();

    let mut routes: Vec<Route> = (0..manager.num_vehicles())
        .map(|v| Route::new(v, manager.start(v), manager.end(v), &evaluator))
        .collect();

    if let Some(route) = routes.iter().find(|r| !dimension.is_feasible(r.distance())) {
        debug!(
            vehicle = route.vehicle_id(),
            distance = route.distance(),
            "empty route already exceeds the bound"
        );
        return Err(RoutingError::InfeasibleProblem {
            unrouted: num_visits,
            upper_bound: dimension.upper_bound(),
        });
    }

    let mut routed = vec![false; num_visits];
    let mut remaining = num_visits;

    while remaining > 0 {
        // (arc cost, location, vehicle, visit index)
        let mut best: Option<(i64, usize, usize, usize)> = None;

        for (idx, position) in manager.visit_positions().enumerate() {
            if routed[idx] {
                continue;
            }
            let location = manager.location_of(position);

            for route in &routes {
                let frontier = route.frontier();
                let arc = evaluator.cost(frontier, position);
                let closed = route
                    .cumuls()
                    .at(route.len())
                    .saturating_add(arc)
                    .saturating_add(evaluator.cost(position, route.end()));
                if !dimension.is_feasible(closed) {
                    continue;
                }

                let candidate = (arc, location, route.vehicle_id(), idx);
                if best.is_none_or(|b| candidate < b) {
                    best = Some(candidate);
                }
            }
        }

        let Some((arc, location, vehicle, idx)) = best else {
            debug!(remaining, "no feasible insertion left");
            return Err(RoutingError::InfeasibleProblem {
                unrouted: remaining,
                upper_bound: dimension.upper_bound(),
            });
        };

        trace!(vehicle, location, arc, "commit arc");
        routes[vehicle].push_visit(RoutePosition::new(idx), &evaluator);
        routed[idx] = true;
        remaining -= 1;
    }

    let solution = Solution::new(routes, dimension);
    debug!(
        objective = solution.objective(),
        total_distance = solution.total_distance(),
        "constructed initial solution"
    );
    Ok(solution)
}
