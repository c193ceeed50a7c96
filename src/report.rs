//! Plain per-vehicle summaries of a solution.

use std::fmt;

use serde::Serialize;

use crate::models::{RoutingModel, Solution};

/// One vehicle's route as locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    /// Vehicle index.
    pub vehicle_id: usize,
    /// Locations from the vehicle's start to its end, both included.
    pub path: Vec<usize>,
    /// Route distance.
    pub distance: i64,
}

impl fmt::Display for RouteReport {
    /// Writes the path as `1 -> 4 -> 0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, location) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{location}")?;
        }
        Ok(())
    }
}

/// Summary of a solution: routes, objective, longest route and span.
///
/// # Examples
///
/// ```
/// use md_routing::models::ProblemInput;
/// use md_routing::report::SolutionReport;
/// use md_routing::models::RoutingModel;
/// use md_routing::solver::Solver;
///
/// let input = ProblemInput {
///     distance_matrix: vec![vec![0, 3, 4], vec![3, 0, 5], vec![4, 5, 0]],
///     num_vehicles: Some(1),
///     starts: vec![1],
///     ends: vec![0],
///     upper_bound: 100,
///     span_cost_coefficient: 0,
/// };
/// let model = RoutingModel::from_input(input).unwrap();
/// let outcome = Solver::default().solve_model(&model).unwrap();
/// let report = SolutionReport::new(&outcome.solution, &model);
///
/// assert_eq!(report.routes[0].to_string(), "1 -> 2 -> 0");
/// assert_eq!(report.routes[0].distance, 9);
/// assert_eq!(report.max_route_distance, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionReport {
    /// Name of the dimension the distances belong to.
    pub dimension: String,
    /// Global objective.
    pub objective: i64,
    /// Sum of route distances.
    pub total_distance: i64,
    /// Longest route distance.
    pub max_route_distance: i64,
    /// Longest minus shortest route distance.
    pub span: i64,
    /// One entry per vehicle, in vehicle order.
    pub routes: Vec<RouteReport>,
}

impl SolutionReport {
    /// Summarizes `solution` in terms of `model`'s locations.
    pub fn new(solution: &Solution, model: &RoutingModel) -> Self {
        let manager = model.manager();
        let routes = solution
            .routes()
            .iter()
            .map(|route| RouteReport {
                vehicle_id: route.vehicle_id(),
                path: route.locations(manager),
                distance: route.distance(),
            })
            .collect();

        Self {
            dimension: model.dimension().name().to_string(),
            objective: solution.objective(),
            total_distance: solution.total_distance(),
            max_route_distance: solution.max_route_distance(),
            span: solution.max_route_distance() - solution.min_route_distance(),
            routes,
        }
    }
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective: {}", self.objective)?;
        for route in &self.routes {
            writeln!(f, "Route for vehicle {}:", route.vehicle_id)?;
            writeln!(f, " {route}")?;
            writeln!(f, "Distance of the route: {}m", route.distance)?;
            writeln!(f)?;
        }
        write!(f, "Maximum of the route distances: {}m", self.max_route_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::evaluation::DistanceDimension;
    use crate::models::{Fleet, Route};

    fn model() -> RoutingModel {
        let rows = vec![
            vec![0, 2, 3, 4],
            vec![2, 0, 1, 2],
            vec![3, 1, 0, 1],
            vec![4, 2, 1, 0],
        ];
        RoutingModel::new(
            CostMatrix::from_rows(rows).expect("valid"),
            Fleet::from_depots(&[1, 1], &[0, 0]).expect("valid"),
            DistanceDimension::new(100, 10),
        )
        .expect("valid")
    }

    fn solution(model: &RoutingModel) -> Solution {
        let m = model.manager();
        let eval = model.evaluator();
        let p = |loc: usize| m.positions_for(loc)[0];
        Solution::new(
            vec![
                Route::from_visits(0, m.start(0), m.end(0), vec![p(2), p(3)], &eval),
                Route::new(1, m.start(1), m.end(1), &eval),
            ],
            model.dimension(),
        )
    }

    #[test]
    fn test_report_fields() {
        let model = model();
        let report = SolutionReport::new(&solution(&model), &model);
        // 1 → 2 → 3 → 0 = 1 + 1 + 4; 1 → 0 = 2.
        assert_eq!(report.routes[0].path, vec![1, 2, 3, 0]);
        assert_eq!(report.routes[0].distance, 6);
        assert_eq!(report.routes[1].path, vec![1, 0]);
        assert_eq!(report.routes[1].distance, 2);
        assert_eq!(report.total_distance, 8);
        assert_eq!(report.max_route_distance, 6);
        assert_eq!(report.span, 4);
        assert_eq!(report.objective, 8 + 40);
        assert_eq!(report.dimension, "Distance");
    }

    #[test]
    fn test_display() {
        let model = model();
        let report = SolutionReport::new(&solution(&model), &model);
        assert_eq!(report.routes[0].to_string(), "1 -> 2 -> 3 -> 0");
        let text = report.to_string();
        assert!(text.starts_with("Objective: 48\n"));
        assert!(text.contains("Route for vehicle 1:\n 1 -> 0\nDistance of the route: 2m\n"));
        assert!(text.ends_with("Maximum of the route distances: 6m"));
    }

    #[test]
    fn test_serialize() {
        let model = model();
        let report = SolutionReport::new(&solution(&model), &model);
        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["objective"], 48);
        assert_eq!(json["routes"][0]["path"], serde_json::json!([1, 2, 3, 0]));
        assert_eq!(json["routes"][1]["vehicle_id"], 1);
    }
}
