//! Solution type.

use super::{Route, RoutePosition};
use crate::evaluation::DistanceDimension;

/// A complete assignment: exactly one route per vehicle.
///
/// The objective is `Σ route distances + span_coefficient × (max − min)`.
/// It is computed on construction and refreshed by the local search after
/// every accepted move.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
/// use md_routing::evaluation::{ArcCostEvaluator, DistanceDimension};
/// use md_routing::models::{Fleet, IndexManager, Route, Solution};
///
/// let matrix = CostMatrix::from_rows(vec![vec![0, 4], vec![4, 0]]).unwrap();
/// let fleet = Fleet::uniform(2, 0, 0).unwrap();
/// let manager = IndexManager::new(2, &fleet).unwrap();
/// let eval = ArcCostEvaluator::new(&manager, &matrix);
/// let dim = DistanceDimension::new(100, 10);
///
/// let visit = manager.positions_for(1)[0];
/// let routes = vec![
///     Route::from_visits(0, manager.start(0), manager.end(0), vec![visit], &eval),
///     Route::new(1, manager.start(1), manager.end(1), &eval),
/// ];
/// let sol = Solution::new(routes, &dim);
/// assert_eq!(sol.total_distance(), 8);
/// assert_eq!(sol.objective(), 8 + 10 * 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    objective: i64,
}

impl Solution {
    /// Creates a solution from one route per vehicle, in vehicle order.
    pub fn new(routes: Vec<Route>, dimension: &DistanceDimension) -> Self {
        let mut solution = Self {
            routes,
            objective: 0,
        };
        solution.refresh_objective(dimension);
        solution
    }

    /// Returns the routes, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the route of a vehicle.
    pub fn route(&self, vehicle: usize) -> &Route {
        &self.routes[vehicle]
    }

    /// Mutable access for the search; callers must refresh the objective.
    pub(crate) fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Global objective value.
    pub fn objective(&self) -> i64 {
        self.objective
    }

    /// Recomputes the objective from the current route distances.
    pub(crate) fn refresh_objective(&mut self, dimension: &DistanceDimension) {
        self.objective = dimension.objective(&self.distances());
    }

    /// Route distances, indexed by vehicle.
    pub fn distances(&self) -> Vec<i64> {
        self.routes.iter().map(|r| r.distance()).collect()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> i64 {
        self.routes
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.distance()))
    }

    /// Distance of the longest route.
    pub fn max_route_distance(&self) -> i64 {
        self.routes.iter().map(|r| r.distance()).max().unwrap_or(0)
    }

    /// Distance of the shortest route.
    pub fn min_route_distance(&self) -> i64 {
        self.routes.iter().map(|r| r.distance()).min().unwrap_or(0)
    }

    /// Total number of visits served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Returns `true` if every route respects the dimension's bound.
    pub fn is_feasible(&self, dimension: &DistanceDimension) -> bool {
        self.routes.iter().all(|r| dimension.is_feasible(r.distance()))
    }

    /// Finds the `(vehicle, offset)` currently holding a visit position.
    pub fn locate(&self, position: RoutePosition) -> Option<(usize, usize)> {
        self.routes.iter().enumerate().find_map(|(vehicle, route)| {
            route
                .visits()
                .iter()
                .position(|&p| p == position)
                .map(|idx| (vehicle, idx + 1))
        })
    }

    /// Cumulative distance of `vehicle`'s route at `position`.
    pub fn cumulative_at(&self, vehicle: usize, position: RoutePosition) -> Option<i64> {
        self.routes.get(vehicle)?.cumulative_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::evaluation::ArcCostEvaluator;
    use crate::models::{Fleet, IndexManager};

    fn setup() -> (CostMatrix, IndexManager) {
        let matrix = CostMatrix::from_rows(vec![
            vec![0, 2, 3, 4],
            vec![2, 0, 5, 6],
            vec![3, 5, 0, 7],
            vec![4, 6, 7, 0],
        ])
        .expect("valid");
        let fleet = Fleet::uniform(2, 0, 0).expect("valid");
        let manager = IndexManager::new(4, &fleet).expect("valid");
        (matrix, manager)
    }

    #[test]
    fn test_solution_metrics() {
        let (matrix, manager) = setup();
        let eval = ArcCostEvaluator::new(&manager, &matrix);
        let dim = DistanceDimension::new(100, 2);
        let p = |loc: usize| manager.positions_for(loc)[0];

        let r0 = Route::from_visits(0, manager.start(0), manager.end(0), vec![p(1), p(2)], &eval);
        let r1 = Route::from_visits(1, manager.start(1), manager.end(1), vec![p(3)], &eval);
        let sol = Solution::new(vec![r0, r1], &dim);

        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.distances(), vec![10, 8]);
        assert_eq!(sol.total_distance(), 18);
        assert_eq!(sol.max_route_distance(), 10);
        assert_eq!(sol.min_route_distance(), 8);
        assert_eq!(sol.objective(), 18 + 2 * 2);
        assert!(sol.is_feasible(&dim));
        assert!(!sol.is_feasible(&DistanceDimension::new(9, 0)));
    }

    #[test]
    fn test_locate_and_cumul() {
        let (matrix, manager) = setup();
        let eval = ArcCostEvaluator::new(&manager, &matrix);
        let dim = DistanceDimension::new(100, 0);
        let p = |loc: usize| manager.positions_for(loc)[0];

        let r0 = Route::new(0, manager.start(0), manager.end(0), &eval);
        let r1 = Route::from_visits(1, manager.start(1), manager.end(1), vec![p(3), p(1)], &eval);
        let sol = Solution::new(vec![r0, r1], &dim);

        assert_eq!(sol.locate(p(1)), Some((1, 2)));
        assert_eq!(sol.locate(p(2)), None);
        assert_eq!(sol.cumulative_at(1, p(1)), Some(10));
        assert_eq!(sol.cumulative_at(0, p(1)), None);
        assert_eq!(sol.cumulative_at(5, p(1)), None);
    }
}
