//! Domain model types for multi-depot vehicle routing.
//!
//! Provides the core abstractions: vehicles with their own start and end
//! depots, the index manager mapping locations to route positions, routes as
//! ordered position sequences with cumulative distances, solutions, and the
//! validated problem model that ties everything together.

mod index;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use index::{IndexManager, PositionRole, RoutePosition};
pub use problem::{ProblemInput, RoutingModel};
pub use route::Route;
pub use solution::Solution;
pub use vehicle::{Fleet, Vehicle};
