//! Arc cost evaluator over route positions.

use crate::distance::CostMatrix;
use crate::models::{IndexManager, RoutePosition};

/// Computes transit costs between route positions.
///
/// Both positions are resolved to locations through the [`IndexManager`] and
/// the cost is read from the [`CostMatrix`]. The evaluator holds only shared
/// references, so it is `Copy` and can be used from several threads at once.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
/// use md_routing::models::{Fleet, IndexManager};
/// use md_routing::evaluation::ArcCostEvaluator;
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0, 2, 9],
///     vec![2, 0, 4],
///     vec![9, 4, 0],
/// ]).unwrap();
/// let fleet = Fleet::uniform(1, 1, 0).unwrap();
/// let manager = IndexManager::new(3, &fleet).unwrap();
/// let evaluator = ArcCostEvaluator::new(&manager, &matrix);
///
/// let visit = manager.positions_for(2)[0];
/// assert_eq!(evaluator.cost(manager.start(0), visit), 4);
/// assert_eq!(evaluator.route_cost(manager.start(0), &[visit], manager.end(0)), 13);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArcCostEvaluator<'a> {
    manager: &'a IndexManager,
    matrix: &'a CostMatrix,
}

impl<'a> ArcCostEvaluator<'a> {
    /// Creates an evaluator for the given index manager and matrix.
    ///
    /// The matrix must cover every location known to the manager; both come
    /// from the same validated [`RoutingModel`](crate::models::RoutingModel).
    pub fn new(manager: &'a IndexManager, matrix: &'a CostMatrix) -> Self {
        debug_assert_eq!(manager.num_locations(), matrix.size());
        Self { manager, matrix }
    }

    /// Transit cost from `from` to `to`.
    #[inline]
    pub fn cost(&self, from: RoutePosition, to: RoutePosition) -> i64 {
        self.matrix
            .get(self.manager.location_of(from), self.manager.location_of(to))
    }

    /// Cost of the full route `start → visits… → end`, saturating at `i64::MAX`.
    pub fn route_cost(&self, start: RoutePosition, visits: &[RoutePosition], end: RoutePosition) -> i64 {
        let mut prev = start;
        let mut total = 0i64;
        for &position in visits {
            total = total.saturating_add(self.cost(prev, position));
            prev = position;
        }
        total.saturating_add(self.cost(prev, end))
    }

    /// The index manager positions are resolved through.
    pub fn manager(&self) -> &'a IndexManager {
        self.manager
    }

    /// The underlying cost matrix.
    pub fn matrix(&self) -> &'a CostMatrix {
        self.matrix
    }
}
