//! Route type.

use super::{IndexManager, RoutePosition};
use crate::evaluation::{ArcCostEvaluator, RouteCumuls};

/// An ordered sequence of visit positions assigned to a single vehicle.
///
/// A route starts at the vehicle's start position and ends at its end
/// position; neither is stored in `visits`. The cumulative distance at every
/// offset is kept in sync with the visit sequence: each mutation recomputes
/// only the suffix it touched.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
/// use md_routing::evaluation::ArcCostEvaluator;
/// use md_routing::models::{Fleet, IndexManager, Route};
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0, 3, 4],
///     vec![3, 0, 5],
///     vec![4, 5, 0],
/// ]).unwrap();
/// let fleet = Fleet::uniform(1, 0, 0).unwrap();
/// let manager = IndexManager::new(3, &fleet).unwrap();
/// let eval = ArcCostEvaluator::new(&manager, &matrix);
///
/// let visits: Vec<_> = manager.visit_positions().collect();
/// let route = Route::from_visits(0, manager.start(0), manager.end(0), visits, &eval);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.distance(), 3 + 5 + 4);
/// assert_eq!(route.locations(&manager), vec![0, 1, 2, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    start: RoutePosition,
    end: RoutePosition,
    visits: Vec<RoutePosition>,
    cumuls: RouteCumuls,
}

impl Route {
    /// Creates the empty route `start → end` for a vehicle.
    pub fn new(
        vehicle_id: usize,
        start: RoutePosition,
        end: RoutePosition,
        evaluator: &ArcCostEvaluator<'_>,
    ) -> Self {
        Self::from_visits(vehicle_id, start, end, Vec::new(), evaluator)
    }

    /// Creates a route over the given visits and computes its cumuls.
    pub fn from_visits(
        vehicle_id: usize,
        start: RoutePosition,
        end: RoutePosition,
        visits: Vec<RoutePosition>,
        evaluator: &ArcCostEvaluator<'_>,
    ) -> Self {
        let cumuls = RouteCumuls::compute(evaluator, start, &visits, end);
        Self {
            vehicle_id,
            start,
            end,
            visits,
            cumuls,
        }
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// The vehicle's start position.
    pub fn start(&self) -> RoutePosition {
        self.start
    }

    /// The vehicle's end position.
    pub fn end(&self) -> RoutePosition {
        self.end
    }

    /// Visit positions in route order (depots excluded).
    pub fn visits(&self) -> &[RoutePosition] {
        &self.visits
    }

    /// Number of visits (excluding depots).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if the route goes straight from start to end.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Total route distance.
    pub fn distance(&self) -> i64 {
        self.cumuls.total()
    }

    /// Cumulative distances, start to end.
    pub fn cumuls(&self) -> &RouteCumuls {
        &self.cumuls
    }

    /// Position at `offset` (0 = start, `len + 1` = end).
    pub fn position_at(&self, offset: usize) -> RoutePosition {
        if offset == 0 {
            self.start
        } else if offset == self.visits.len() + 1 {
            self.end
        } else {
            self.visits[offset - 1]
        }
    }

    /// Offset of `position` within this route, if it belongs to it.
    pub fn offset_of(&self, position: RoutePosition) -> Option<usize> {
        if position == self.start {
            Some(0)
        } else if position == self.end {
            Some(self.visits.len() + 1)
        } else {
            self.visits
                .iter()
                .position(|&p| p == position)
                .map(|idx| idx + 1)
        }
    }

    /// Cumulative distance from the start up to `position`.
    pub fn cumulative_at(&self, position: RoutePosition) -> Option<i64> {
        self.offset_of(position).map(|offset| self.cumuls.at(offset))
    }

    /// The last position reached so far: the last visit, or the start.
    pub fn frontier(&self) -> RoutePosition {
        self.visits.last().copied().unwrap_or(self.start)
    }

    /// Full location path `start → … → end`.
    pub fn locations(&self, manager: &IndexManager) -> Vec<usize> {
        std::iter::once(self.start)
            .chain(self.visits.iter().copied())
            .chain(std::iter::once(self.end))
            .map(|p| manager.location_of(p))
            .collect()
    }

    /// Appends a visit just before the end.
    pub(crate) fn push_visit(&mut self, position: RoutePosition, evaluator: &ArcCostEvaluator<'_>) {
        self.visits.push(position);
        self.refresh_from(self.visits.len() - 1, evaluator);
    }

    /// Reverses the visits at indices `i..=j`.
    pub(crate) fn reverse(&mut self, i: usize, j: usize, evaluator: &ArcCostEvaluator<'_>) {
        self.visits[i..=j].reverse();
        self.refresh_from(i, evaluator);
    }

    /// Removes `len` visits starting at index `from` and returns them.
    pub(crate) fn remove_segment(
        &mut self,
        from: usize,
        len: usize,
        evaluator: &ArcCostEvaluator<'_>,
    ) -> Vec<RoutePosition> {
        let segment: Vec<RoutePosition> = self.visits.drain(from..from + len).collect();
        self.refresh_from(from, evaluator);
        segment
    }

    /// Inserts a segment so that its first visit lands at index `at`.
    pub(crate) fn insert_segment(
        &mut self,
        at: usize,
        segment: &[RoutePosition],
        evaluator: &ArcCostEvaluator<'_>,
    ) {
        self.visits.splice(at..at, segment.iter().copied());
        self.refresh_from(at, evaluator);
    }

    /// Recomputes cumuls after visits from index `first_changed` on moved.
    fn refresh_from(&mut self, first_changed: usize, evaluator: &ArcCostEvaluator<'_>) {
        self.cumuls
            .recompute_from(evaluator, self.start, &self.visits, self.end, first_changed + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::models::Fleet;

    fn line() -> (CostMatrix, IndexManager) {
        let rows = (0..5)
            .map(|i: i64| (0..5).map(|j: i64| (i - j).abs()).collect())
            .collect();
        let matrix = CostMatrix::from_rows(rows).expect("valid");
        let fleet = Fleet::uniform(1, 0, 0).expect("valid");
        let manager = IndexManager::new(5, &fleet).expect("valid");
        (matrix, manager)
    }

    fn visit(manager: &IndexManager, location: usize) -> RoutePosition {
        manager.positions_for(location)[0]
    }

    #[test]
    fn test_route_empty() {
        let (matrix, manager) = line();
        let eval = ArcCostEvaluator::new(&manager, &matrix);
        let r = Route::new(0, manager.start(0), manager.end(0), &eval);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.distance(), 0);
        assert_eq!(r.frontier(), manager.start(0));
        assert_eq!(r.locations(&manager), vec![0, 0]);
    }

    #[test]
    fn test_push_visit() {
        let (matrix, manager) = line();
        let eval = ArcCostEvaluator::new(&manager, &matrix);
        let mut r = Route::new(0, manager.start(0), manager.end(0), &eval);
        r.push_visit(visit(&manager, 2), &eval);
        r.push_visit(visit(&manager, 4), &eval);
        assert_eq!(r.locations(&manager), vec![0, 2, 4, 0]);
        assert_eq!(r.distance(), 8);
        assert_eq!(r.frontier(), visit(&manager, 4));
        assert_eq!(r.cumulative_at(visit(&manager, 4)), Some(4));
    }

    #[test]
    fn test_offsets() {
        let (matrix, manager) = line();
        let eval = ArcCostEvaluator::new(&manager, &matrix);
        let visits = vec![visit(&manager, 3), visit(&manager, 1)];
        let r = Route::from_visits(0, manager.start(0), manager.end(0), visits, &eval);
        assert_eq!(r.offset_of(manager.start(0)), Some(0));
        assert_eq!(r.offset_of(visit(&manager, 1)), Some(2));
        assert_eq!(r.offset_of(manager.end(0)), Some(3));
        assert_eq!(r.offset_of(visit(&manager, 2)), None);
        assert_eq!(r.position_at(1), visit(&manager, 3));
        assert_eq!(r.cumulative_at(manager.end(0)), Some(r.distance()));
    }

    #[test]
    fn test_mutations_keep_cumuls_consistent() {
        let (matrix, manager) = line();
        let eval = ArcCostEvaluator::new(&manager, &matrix);
        let visits = vec![
            visit(&manager, 1),
            visit(&manager, 3),
            visit(&manager, 2),
            visit(&manager, 4),
        ];
        let mut r = Route::from_visits(0, manager.start(0), manager.end(0), visits, &eval);

        r.reverse(1, 2, &eval);
        assert_eq!(r.locations(&manager), vec![0, 1, 2, 3, 4, 0]);
        assert_eq!(r.distance(), 8);

        let seg = r.remove_segment(1, 2, &eval);
        assert_eq!(r.locations(&manager), vec![0, 1, 4, 0]);
        let fresh = Route::from_visits(0, r.start(), r.end(), r.visits().to_vec(), &eval);
        assert_eq!(r.cumuls(), fresh.cumuls());

        r.insert_segment(2, &seg, &eval);
        assert_eq!(r.locations(&manager), vec![0, 1, 4, 2, 3, 0]);
        let fresh = Route::from_visits(0, r.start(), r.end(), r.visits().to_vec(), &eval);
        assert_eq!(r.cumuls(), fresh.cumuls());
    }
}
