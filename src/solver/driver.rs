//! Solve orchestration: validation, construction, improvement.

use std::sync::atomic::AtomicBool;

use tracing::{debug, info, info_span};

use super::budget::SearchBudget;
use super::SolverConfig;
use crate::constructive::path_cheapest_arc;
use crate::error::RoutingResult;
use crate::local_search::LocalSearch;
use crate::models::{ProblemInput, RoutingModel, Solution};
use crate::report::SolutionReport;

/// Lifecycle of a [`Solver`] within one solve.
///
/// ```text
/// Uninitialized → Validated → Constructed → Improving → Done
///        └────────────┴────────────→ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// No solve started yet.
    Uninitialized,
    /// The model passed validation.
    Validated,
    /// An initial feasible solution exists.
    Constructed,
    /// Local search is running.
    Improving,
    /// A solution was returned.
    Done,
    /// Validation or construction failed.
    Failed,
}

/// Why the local search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A full pass found no improving move.
    LocalOptimum,
    /// The pass budget ran out.
    IterationLimit,
    /// The wall-clock limit was reached.
    TimeLimit,
    /// The interrupt flag was raised; the solution is the best found so far.
    Cancelled,
}

/// Counters collected during a solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Local search passes run.
    pub passes: usize,
    /// Accepted 2-opt reversals.
    pub two_opt_moves: usize,
    /// Accepted Or-opt relocations.
    pub or_opt_moves: usize,
    /// Objective of the constructed solution.
    pub constructed_objective: i64,
    /// Objective of the returned solution.
    pub final_objective: i64,
    /// Objective after every accepted move, in order.
    pub objective_history: Vec<i64>,
}

/// Result of a successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    /// Best solution found.
    pub solution: Solution,
    /// Why the search stopped.
    pub status: SolveStatus,
    /// Search counters.
    pub stats: SolveStats,
}

impl SolveOutcome {
    /// Builds the per-vehicle report of the solution.
    pub fn report(&self, model: &RoutingModel) -> SolutionReport {
        SolutionReport::new(&self.solution, model)
    }
}

/// Runs path cheapest arc followed by local search.
///
/// Each call to a `solve*` method is independent; only the last state is
/// kept for inspection.
///
/// # Examples
///
/// ```
/// use md_routing::models::ProblemInput;
/// use md_routing::solver::{SolveStatus, Solver, SolverConfig, SolverState};
///
/// let input = ProblemInput {
///     distance_matrix: vec![
///         vec![0, 2, 9, 10],
///         vec![1, 0, 6, 4],
///         vec![15, 7, 0, 8],
///         vec![6, 3, 12, 0],
///     ],
///     num_vehicles: None,
///     starts: vec![0, 0],
///     ends: vec![0, 0],
///     upper_bound: 100,
///     span_cost_coefficient: 10,
/// };
///
/// let mut solver = Solver::new(SolverConfig::default());
/// let outcome = solver.solve(input).unwrap();
/// assert_eq!(solver.state(), SolverState::Done);
/// assert_eq!(outcome.status, SolveStatus::LocalOptimum);
/// assert_eq!(outcome.solution.num_served(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    state: SolverState,
}

impl Solver {
    /// Creates a solver with the given budget.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            state: SolverState::Uninitialized,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the state reached by the last solve.
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Validates `input`, then solves it.
    pub fn solve(&mut self, input: ProblemInput) -> RoutingResult<SolveOutcome> {
        self.state = SolverState::Uninitialized;
        let model = match RoutingModel::from_input(input) {
            Ok(model) => model,
            Err(err) => {
                debug!(error = %err, "problem rejected");
                self.transition(SolverState::Failed);
                return Err(err);
            }
        };
        self.run(&model, None, &mut |_, _| {})
    }

    /// Solves an already validated model.
    pub fn solve_model(&mut self, model: &RoutingModel) -> RoutingResult<SolveOutcome> {
        self.state = SolverState::Uninitialized;
        self.run(model, None, &mut |_, _| {})
    }

    /// Solves `model`, stopping early once `interrupt` is set.
    ///
    /// The flag is read between local search passes. Cancellation is not an
    /// error: the outcome carries the best solution found so far with
    /// [`SolveStatus::Cancelled`].
    pub fn solve_with_interrupt(
        &mut self,
        model: &RoutingModel,
        interrupt: &AtomicBool,
    ) -> RoutingResult<SolveOutcome> {
        self.solve_with_progress(model, interrupt, |_, _| {})
    }

    /// Like [`solve_with_interrupt`](Self::solve_with_interrupt), calling
    /// `on_pass` with the pass number and the working solution after every
    /// local search pass.
    ///
    /// The flag is read right after `on_pass` returns, so raising it from the
    /// callback stops the search before the next pass.
    pub fn solve_with_progress<F>(
        &mut self,
        model: &RoutingModel,
        interrupt: &AtomicBool,
        mut on_pass: F,
    ) -> RoutingResult<SolveOutcome>
    where
        F: FnMut(usize, &Solution),
    {
        self.state = SolverState::Uninitialized;
        self.run(model, Some(interrupt), &mut on_pass)
    }

    fn run(
        &mut self,
        model: &RoutingModel,
        interrupt: Option<&AtomicBool>,
        on_pass: &mut dyn FnMut(usize, &Solution),
    ) -> RoutingResult<SolveOutcome> {
        let span = info_span!(
            "solve",
            locations = model.num_locations(),
            vehicles = model.num_vehicles()
        );
        let _guard = span.enter();

        let mut budget = SearchBudget::new(self.config.max_iterations, self.config.time_limit);
        if let Some(flag) = interrupt {
            budget = budget.with_interrupt(flag);
        }
        self.transition(SolverState::Validated);

        let mut solution = match path_cheapest_arc(model) {
            Ok(solution) => solution,
            Err(err) => {
                debug!(error = %err, "construction failed");
                self.transition(SolverState::Failed);
                return Err(err);
            }
        };
        self.transition(SolverState::Constructed);

        let mut stats = SolveStats {
            constructed_objective: solution.objective(),
            ..SolveStats::default()
        };

        self.transition(SolverState::Improving);
        let search = LocalSearch::new(model).with_parallel(self.config.parallel);
        let status = loop {
            if let Some(stop) = budget.exhausted(stats.passes) {
                break stop;
            }
            let outcome = search.run_pass(&mut solution);
            stats.passes += 1;
            stats.two_opt_moves += outcome.two_opt.len();
            stats.or_opt_moves += outcome.or_opt.len();
            debug!(
                pass = stats.passes,
                moves = outcome.moves(),
                objective = solution.objective(),
                "pass finished"
            );
            on_pass(stats.passes, &solution);
            if outcome.is_empty() {
                break SolveStatus::LocalOptimum;
            }
            stats.objective_history.extend(outcome.two_opt);
            stats.objective_history.extend(outcome.or_opt);
        };
        stats.final_objective = solution.objective();
        self.transition(SolverState::Done);

        info!(
            objective = stats.final_objective,
            constructed = stats.constructed_objective,
            passes = stats.passes,
            status = ?status,
            elapsed_ms = budget.elapsed().as_millis() as u64,
            "solve finished"
        );

        Ok(SolveOutcome {
            solution,
            status,
            stats,
        })
    }

    fn transition(&mut self, next: SolverState) {
        debug!(from = ?self.state, to = ?next, "solver state");
        self.state = next;
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
