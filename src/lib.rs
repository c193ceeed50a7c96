//! # md-routing
//!
//! Multi-depot vehicle routing engine: every vehicle has its own start and
//! end location, routes are bounded by a cumulative distance dimension, and
//! the objective adds a weighted span (longest minus shortest route) to the
//! total distance.
//!
//! ## Modules
//!
//! - [`models`] — Vehicles and fleets, the location ⇄ position index manager,
//!   routes, solutions and the validated [`RoutingModel`](models::RoutingModel)
//! - [`distance`] — Validated integer cost matrix
//! - [`evaluation`] — Arc cost evaluator and the distance dimension
//! - [`constructive`] — Path cheapest arc construction
//! - [`local_search`] — 2-opt and Or-opt improvement
//! - [`solver`] — Solve driver with pass/time budget and cancellation
//! - [`report`] — Per-vehicle route summaries
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use md_routing::models::ProblemInput;
//! use md_routing::solver::Solver;
//!
//! let input = ProblemInput {
//!     distance_matrix: vec![
//!         vec![0, 5, 4, 6],
//!         vec![5, 0, 3, 7],
//!         vec![4, 3, 0, 2],
//!         vec![6, 7, 2, 0],
//!     ],
//!     num_vehicles: Some(2),
//!     starts: vec![1, 1],
//!     ends: vec![0, 0],
//!     upper_bound: 50,
//!     span_cost_coefficient: 100,
//! };
//!
//! let outcome = Solver::default().solve(input).unwrap();
//! assert_eq!(outcome.solution.num_served(), 2);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod report;
pub mod solver;

pub use error::{RoutingError, RoutingResult};
