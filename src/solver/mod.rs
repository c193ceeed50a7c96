//! Solver driver.
//!
//! [`Solver`] validates a problem, builds an initial solution with
//! [`path_cheapest_arc`](crate::constructive::path_cheapest_arc), then runs
//! local search passes until a local optimum, the pass budget, the time
//! limit, or an external interrupt stops it.

mod budget;
mod config;
mod driver;

pub use config::SolverConfig;
pub use driver::{SolveOutcome, SolveStats, SolveStatus, Solver, SolverState};
