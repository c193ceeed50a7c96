//! Local search operators for improving multi-depot solutions.
//!
//! - [`two_opt_pass`] — Intra-route 2-opt segment reversal
//! - [`or_opt_pass`] — Intra- and inter-route relocation of 1–3 visit segments
//!
//! Only strictly improving moves are accepted, so repeated passes end in a
//! local optimum.

mod or_opt;
mod two_opt;

pub use or_opt::{apply_or_opt, best_or_opt, or_opt_pass, OrOptMove, MAX_SEGMENT_LEN};
pub use two_opt::{best_two_opt, two_opt_pass, TwoOptMove};

use crate::evaluation::DistanceDimension;
use crate::models::{RoutingModel, Solution};

/// Objectives reached by the moves accepted during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// Objective after each accepted 2-opt move.
    pub two_opt: Vec<i64>,
    /// Objective after each accepted Or-opt move.
    pub or_opt: Vec<i64>,
}

impl PassOutcome {
    /// Returns `true` if the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.two_opt.is_empty() && self.or_opt.is_empty()
    }

    /// Number of accepted moves.
    pub fn moves(&self) -> usize {
        self.two_opt.len() + self.or_opt.len()
    }
}

/// Runs the neighbourhoods round-robin over a working solution.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
/// use md_routing::evaluation::DistanceDimension;
/// use md_routing::models::{Fleet, RoutingModel};
/// use md_routing::constructive::path_cheapest_arc;
/// use md_routing::local_search::LocalSearch;
///
/// let rows = (0..6i64).map(|i| (0..6i64).map(|j| (i - j).abs()).collect()).collect();
/// let model = RoutingModel::new(
///     CostMatrix::from_rows(rows).unwrap(),
///     Fleet::uniform(2, 0, 0).unwrap(),
///     DistanceDimension::new(100, 5),
/// ).unwrap();
///
/// let mut solution = path_cheapest_arc(&model).unwrap();
/// let initial = solution.objective();
/// let passes = LocalSearch::new(&model).improve(&mut solution, 50);
/// assert!(passes <= 50);
/// assert!(solution.objective() <= initial);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch<'a> {
    model: &'a RoutingModel,
    parallel: bool,
}

impl<'a> LocalSearch<'a> {
    /// Creates a sequential local search over `model`.
    pub fn new(model: &'a RoutingModel) -> Self {
        Self {
            model,
            parallel: false,
        }
    }

    /// Evaluates 2-opt candidates of different routes on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// One round-robin pass: 2-opt on every route, then Or-opt.
    pub fn run_pass(&self, solution: &mut Solution) -> PassOutcome {
        let two_opt = two_opt_pass(solution, self.model, self.parallel);
        let or_opt = or_opt_pass(solution, self.model);
        PassOutcome { two_opt, or_opt }
    }

    /// Runs passes until one finds no move or `max_passes` is reached.
    ///
    /// Returns the number of passes run.
    pub fn improve(&self, solution: &mut Solution, max_passes: usize) -> usize {
        for pass in 0..max_passes {
            if self.run_pass(solution).is_empty() {
                return pass + 1;
            }
        }
        max_passes
    }
}

/// Objective with some route distances replaced, without allocating.
pub(crate) fn objective_with(
    dimension: &DistanceDimension,
    distances: &[i64],
    replaced: &[(usize, i64)],
) -> i64 {
    let mut total = 0i64;
    let mut max = i64::MIN;
    let mut min = i64::MAX;
    for (vehicle, &current) in distances.iter().enumerate() {
        let d = replaced
            .iter()
            .find(|(v, _)| *v == vehicle)
            .map_or(current, |&(_, d)| d);
        total = total.saturating_add(d);
        max = max.max(d);
        min = min.min(d);
    }
    if distances.is_empty() {
        return 0;
    }
    total.saturating_add(dimension.span_cost_coefficient().saturating_mul(max - min))
}
