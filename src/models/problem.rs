//! Routing problem instance.

use serde::Deserialize;

use super::{Fleet, IndexManager};
use crate::distance::CostMatrix;
use crate::error::{RoutingError, RoutingResult, VehicleSpecDefect};
use crate::evaluation::{ArcCostEvaluator, DistanceDimension};

/// Raw problem description as supplied by an I/O layer.
///
/// Nothing here is trusted; [`RoutingModel::from_input`] validates it.
///
/// # Examples
///
/// ```
/// use md_routing::models::{ProblemInput, RoutingModel};
///
/// let input = ProblemInput {
///     distance_matrix: vec![vec![0, 3], vec![3, 0]],
///     num_vehicles: Some(1),
///     starts: vec![0],
///     ends: vec![0],
///     upper_bound: 100,
///     span_cost_coefficient: 0,
/// };
/// let model = RoutingModel::from_input(input).unwrap();
/// assert_eq!(model.num_vehicles(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProblemInput {
    /// N×N transit costs.
    pub distance_matrix: Vec<Vec<i64>>,
    /// Declared vehicle count; checked against the depot lists when given.
    #[serde(default)]
    pub num_vehicles: Option<usize>,
    /// Start location per vehicle.
    pub starts: Vec<usize>,
    /// End location per vehicle.
    pub ends: Vec<usize>,
    /// Maximum cumulative distance of any single route.
    pub upper_bound: u64,
    /// Weight of `max − min` route distance in the objective.
    #[serde(default)]
    pub span_cost_coefficient: u64,
}

/// A validated, read-only problem description.
///
/// Owns the cost matrix, the fleet, the index manager and the distance
/// dimension. Everything downstream borrows from it.
#[derive(Debug, Clone)]
pub struct RoutingModel {
    matrix: CostMatrix,
    fleet: Fleet,
    manager: IndexManager,
    dimension: DistanceDimension,
}

impl RoutingModel {
    /// Validates the parts and ties them together.
    ///
    /// Fails with [`RoutingError::InvalidVehicleSpec`] if a depot lies outside
    /// the matrix.
    pub fn new(
        matrix: CostMatrix,
        fleet: Fleet,
        dimension: DistanceDimension,
    ) -> RoutingResult<Self> {
        let manager = IndexManager::new(matrix.size(), &fleet)?;
        Ok(Self {
            matrix,
            fleet,
            manager,
            dimension,
        })
    }

    /// Validates a raw [`ProblemInput`].
    ///
    /// The matrix is checked first, then the fleet.
    pub fn from_input(input: ProblemInput) -> RoutingResult<Self> {
        let matrix = CostMatrix::from_rows(input.distance_matrix)?;

        if let Some(declared) = input.num_vehicles {
            if declared != input.starts.len() || declared != input.ends.len() {
                return Err(RoutingError::InvalidVehicleSpec {
                    vehicle: None,
                    num_locations: matrix.size(),
                    defect: VehicleSpecDefect::LengthMismatch {
                        vehicles: declared,
                        starts: input.starts.len(),
                        ends: input.ends.len(),
                    },
                });
            }
        }

        let fleet = Fleet::from_depots(&input.starts, &input.ends).map_err(|err| match err {
            RoutingError::InvalidVehicleSpec {
                vehicle, defect, ..
            } => RoutingError::InvalidVehicleSpec {
                vehicle,
                num_locations: matrix.size(),
                defect,
            },
            other => other,
        })?;

        let dimension = DistanceDimension::new(input.upper_bound, input.span_cost_coefficient);
        Self::new(matrix, fleet, dimension)
    }

    /// The cost matrix.
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// The fleet.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// The index manager.
    pub fn manager(&self) -> &IndexManager {
        &self.manager
    }

    /// The distance dimension.
    pub fn dimension(&self) -> &DistanceDimension {
        &self.dimension
    }

    /// An arc cost evaluator borrowing this model.
    pub fn evaluator(&self) -> ArcCostEvaluator<'_> {
        ArcCostEvaluator::new(&self.manager, &self.matrix)
    }

    /// Number of locations (N).
    pub fn num_locations(&self) -> usize {
        self.matrix.size()
    }

    /// Number of vehicles (V).
    pub fn num_vehicles(&self) -> usize {
        self.fleet.len()
    }
}
