use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use md_routing::error::{MatrixDefect, RoutingError};
use md_routing::models::{ProblemInput, RoutingModel};
use md_routing::report::SolutionReport;
use md_routing::solver::{SolveStatus, Solver, SolverConfig, SolverState};

fn seventeen_locations() -> Vec<Vec<i64>> {
    vec![
        vec![0, 548, 776, 696, 582, 274, 502, 194, 308, 194, 536, 502, 388, 354, 468, 776, 662],
        vec![548, 0, 684, 308, 194, 502, 730, 354, 696, 742, 1084, 594, 480, 674, 1016, 868, 1210],
        vec![776, 684, 0, 992, 878, 502, 274, 810, 468, 742, 400, 1278, 1164, 1130, 788, 1552, 754],
        vec![696, 308, 992, 0, 114, 650, 878, 502, 844, 890, 1232, 514, 628, 822, 1164, 560, 1358],
        vec![582, 194, 878, 114, 0, 536, 764, 388, 730, 776, 1118, 400, 514, 708, 1050, 674, 1244],
        vec![274, 502, 502, 650, 536, 0, 228, 308, 194, 240, 582, 776, 662, 628, 514, 1050, 708],
        vec![502, 730, 274, 878, 764, 228, 0, 536, 194, 468, 354, 1004, 890, 856, 514, 1278, 480],
        vec![194, 354, 810, 502, 388, 308, 536, 0, 342, 388, 730, 468, 354, 320, 662, 742, 856],
        vec![308, 696, 468, 844, 730, 194, 194, 342, 0, 274, 388, 810, 696, 662, 320, 1084, 514],
        vec![194, 742, 742, 890, 776, 240, 468, 388, 274, 0, 342, 536, 422, 388, 274, 810, 468],
        vec![536, 1084, 400, 1232, 1118, 582, 354, 730, 388, 342, 0, 878, 764, 730, 388, 1152, 354],
        vec![502, 594, 1278, 514, 400, 776, 1004, 468, 810, 536, 878, 0, 114, 308, 650, 274, 844],
        vec![388, 480, 1164, 628, 514, 662, 890, 354, 696, 422, 764, 114, 0, 194, 536, 388, 730],
        vec![354, 674, 1130, 822, 708, 628, 856, 320, 662, 388, 730, 308, 194, 0, 342, 422, 536],
        vec![468, 1016, 788, 1164, 1050, 514, 514, 662, 320, 274, 388, 650, 536, 342, 0, 764, 194],
        vec![776, 868, 1552, 560, 674, 1050, 1278, 742, 1084, 810, 1152, 274, 388, 422, 764, 0, 798],
        vec![662, 1210, 754, 1358, 1244, 708, 480, 856, 514, 468, 354, 844, 730, 536, 194, 798, 0],
    ]
}

fn four_depot_input(upper_bound: u64) -> ProblemInput {
    ProblemInput {
        distance_matrix: seventeen_locations(),
        num_vehicles: Some(4),
        starts: vec![1, 2, 15, 16],
        ends: vec![0, 0, 0, 0],
        upper_bound,
        span_cost_coefficient: 100,
    }
}

#[test]
fn single_location_gives_trivial_routes() {
    let input = ProblemInput {
        distance_matrix: vec![vec![0]],
        num_vehicles: None,
        starts: vec![0, 0],
        ends: vec![0, 0],
        upper_bound: 0,
        span_cost_coefficient: 100,
    };
    let model = RoutingModel::from_input(input).expect("valid");
    let outcome = Solver::default().solve_model(&model).expect("feasible");

    let report = SolutionReport::new(&outcome.solution, &model);
    for route in &report.routes {
        assert_eq!(route.path, vec![0, 0]);
        assert_eq!(route.distance, 0);
    }
    assert_eq!(report.objective, 0);
}

#[test]
fn self_loop_cost_counts_for_bare_routes() {
    let input = ProblemInput {
        distance_matrix: vec![vec![5]],
        num_vehicles: Some(1),
        starts: vec![0],
        ends: vec![0],
        upper_bound: 10,
        span_cost_coefficient: 0,
    };
    let outcome = Solver::default().solve(input).expect("feasible");
    assert_eq!(outcome.solution.route(0).distance(), 5);
    assert_eq!(outcome.solution.objective(), 5);
}

#[test]
fn four_depot_instance_is_covered_once() {
    let model = RoutingModel::from_input(four_depot_input(2000)).expect("valid");
    let mut solver = Solver::new(SolverConfig::default());
    let outcome = solver.solve_model(&model).expect("feasible");
    assert_eq!(solver.state(), SolverState::Done);
    assert_eq!(outcome.status, SolveStatus::LocalOptimum);

    let report = outcome.report(&model);
    let starts = [1, 2, 15, 16];
    let mut seen = BTreeSet::new();
    for (route, &start) in report.routes.iter().zip(&starts) {
        assert_eq!(route.path.first(), Some(&start));
        assert_eq!(route.path.last(), Some(&0));
        assert!(route.distance <= 2000);
        assert_eq!(route.distance, model.matrix().path_cost(&route.path));
        for &location in &route.path[1..route.path.len() - 1] {
            assert!(seen.insert(location), "location {location} visited twice");
        }
    }
    let expected: BTreeSet<usize> = (3..=14).collect();
    assert_eq!(seen, expected);

    assert_eq!(outcome.stats.constructed_objective, 116_342);
    assert!(outcome.stats.final_objective <= outcome.stats.constructed_objective);
    assert_eq!(report.objective, outcome.stats.final_objective);
}

#[test]
fn four_depot_instance_final_routes() {
    let model = RoutingModel::from_input(four_depot_input(2000)).expect("valid");
    let outcome = Solver::default().solve_model(&model).expect("feasible");
    let report = outcome.report(&model);

    let paths: Vec<String> = report.routes.iter().map(ToString::to_string).collect();
    assert_eq!(
        paths,
        vec![
            "1 -> 4 -> 3 -> 0",
            "2 -> 6 -> 8 -> 5 -> 9 -> 0",
            "15 -> 11 -> 12 -> 13 -> 7 -> 0",
            "16 -> 14 -> 10 -> 0",
        ]
    );
    assert_eq!(report.max_route_distance, 1118);
    assert_eq!(report.span, 1118 - 1004);
    assert_eq!(report.objective, 15_714);
}

#[test]
fn cancel_after_first_pass_keeps_its_improvements() {
    let model = RoutingModel::from_input(four_depot_input(2000)).expect("valid");
    let flag = AtomicBool::new(false);
    let mut after_first = None;
    let mut solver = Solver::default();
    let outcome = solver
        .solve_with_progress(&model, &flag, |pass, solution| {
            if pass == 1 {
                after_first = Some(solution.clone());
                flag.store(true, Ordering::Relaxed);
            }
        })
        .expect("feasible");

    assert_eq!(solver.state(), SolverState::Done);
    assert_eq!(outcome.status, SolveStatus::Cancelled);
    assert_eq!(outcome.stats.passes, 1);
    assert_eq!(Some(&outcome.solution), after_first.as_ref());
    assert!(outcome.stats.final_objective < 116_342);
    assert!(outcome.stats.final_objective >= 15_714);
    assert!(outcome.solution.is_feasible(model.dimension()));
}

#[test]
fn huge_entries_saturate_instead_of_wrapping() {
    // One visit fits exactly below i64::MAX; a second one would overflow.
    let half = i64::MAX / 2;
    let input = ProblemInput {
        distance_matrix: vec![vec![0, half, half], vec![half, 0, half], vec![half, half, 0]],
        num_vehicles: Some(2),
        starts: vec![0, 0],
        ends: vec![0, 0],
        upper_bound: u64::MAX,
        span_cost_coefficient: 100,
    };
    let model = RoutingModel::from_input(input).expect("valid");
    let outcome = Solver::default().solve_model(&model).expect("feasible");
    let report = outcome.report(&model);

    for route in &report.routes {
        assert_eq!(route.path.len(), 3);
        assert_eq!(route.distance, i64::MAX - 1);
    }
    assert_eq!(report.objective, i64::MAX);
    assert!(outcome.solution.is_feasible(model.dimension()));
}

#[test]
fn tight_bound_is_infeasible() {
    let mut solver = Solver::default();
    let err = solver.solve(four_depot_input(1000)).unwrap_err();
    assert_eq!(
        err,
        RoutingError::InfeasibleProblem {
            unrouted: 2,
            upper_bound: 1000
        }
    );
    assert_eq!(solver.state(), SolverState::Failed);

    // 2 → 0 alone costs 776.
    let err = solver.solve(four_depot_input(500)).unwrap_err();
    assert_eq!(
        err,
        RoutingError::InfeasibleProblem {
            unrouted: 12,
            upper_bound: 500
        }
    );
}

#[test]
fn negative_entry_is_rejected() {
    let mut matrix = seventeen_locations();
    matrix[3][7] = -1;
    let input = ProblemInput {
        distance_matrix: matrix,
        ..four_depot_input(2000)
    };
    let mut solver = Solver::default();
    let err = solver.solve(input).unwrap_err();
    match err {
        RoutingError::InvalidMatrix { rows, defect } => {
            assert_eq!(rows, 17);
            assert_eq!(
                defect,
                MatrixDefect::NegativeEntry {
                    row: 3,
                    col: 7,
                    value: -1
                }
            );
        }
        other => panic!("expected InvalidMatrix, got {other:?}"),
    }
    assert_eq!(solver.state(), SolverState::Failed);
}

#[test]
fn report_serializes() {
    let model = RoutingModel::from_input(four_depot_input(2000)).expect("valid");
    let outcome = Solver::default().solve_model(&model).expect("feasible");
    let json = serde_json::to_value(outcome.report(&model)).expect("serializable");
    assert_eq!(json["routes"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["dimension"], "Distance");
    assert_eq!(json["objective"], outcome.solution.objective());
}
