//! Typed failures surfaced by the routing engine.
//!
//! Validation failures are detected eagerly, before any search work begins.
//! Infeasibility is reported by the construction heuristic. Cancellation is
//! not an error: it is reported through
//! [`SolveStatus::Cancelled`](crate::solver::SolveStatus::Cancelled) together
//! with the best solution found.

use std::fmt::{self, Display};

/// Why a cost matrix was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixDefect {
    /// The matrix has no rows.
    Empty,
    /// A row has a different length than the number of rows.
    NotSquare {
        /// Offending row.
        row: usize,
        /// Length of that row.
        len: usize,
    },
    /// A cell holds a negative cost.
    NegativeEntry {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The negative value.
        value: i64,
    },
}

impl Display for MatrixDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "matrix has no rows"),
            Self::NotSquare { row, len } => write!(f, "row {row} has {len} entries"),
            Self::NegativeEntry { row, col, value } => {
                write!(f, "entry ({row}, {col}) is negative ({value})")
            }
        }
    }
}

/// Why a fleet specification was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleSpecDefect {
    /// The fleet has no vehicles.
    EmptyFleet,
    /// Start and end lists (or the declared vehicle count) disagree in length.
    LengthMismatch {
        /// Declared number of vehicles.
        vehicles: usize,
        /// Number of start locations.
        starts: usize,
        /// Number of end locations.
        ends: usize,
    },
    /// The vehicle's start location lies outside `[0, N)`.
    StartOutOfRange {
        /// The offending location.
        location: usize,
    },
    /// The vehicle's end location lies outside `[0, N)`.
    EndOutOfRange {
        /// The offending location.
        location: usize,
    },
}

/// Errors produced while validating or solving a routing model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The cost matrix is empty, not square, or contains a negative entry.
    InvalidMatrix {
        /// Number of rows supplied.
        rows: usize,
        /// The defect found.
        defect: MatrixDefect,
    },
    /// The fleet is malformed.
    InvalidVehicleSpec {
        /// Index of the offending vehicle, when the defect is vehicle-specific.
        vehicle: Option<usize>,
        /// Number of locations the depots are checked against.
        num_locations: usize,
        /// The defect found.
        defect: VehicleSpecDefect,
    },
    /// No insertion sequence keeps every route within the distance bound.
    InfeasibleProblem {
        /// Locations still unrouted when construction got stuck.
        unrouted: usize,
        /// The bound that could not be met.
        upper_bound: i64,
    },
}

/// Result alias used across the crate.
pub type RoutingResult<T> = Result<T, RoutingError>;

impl Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMatrix { rows, defect } => {
                write!(f, "Invalid cost matrix with {rows} rows: {defect}")
            }
            Self::InvalidVehicleSpec {
                vehicle,
                num_locations,
                defect,
            } => {
                write!(f, "Invalid vehicle specification")?;
                if let Some(v) = vehicle {
                    write!(f, " for vehicle {v}")?;
                }
                match defect {
                    VehicleSpecDefect::EmptyFleet => write!(f, ": fleet has no vehicles"),
                    VehicleSpecDefect::LengthMismatch {
                        vehicles,
                        starts,
                        ends,
                    } => write!(
                        f,
                        ": {vehicles} vehicles but {starts} starts and {ends} ends"
                    ),
                    VehicleSpecDefect::StartOutOfRange { location } => write!(
                        f,
                        ": start location {location} outside [0, {num_locations})"
                    ),
                    VehicleSpecDefect::EndOutOfRange { location } => write!(
                        f,
                        ": end location {location} outside [0, {num_locations})"
                    ),
                }
            }
            Self::InfeasibleProblem {
                unrouted,
                upper_bound,
            } => write!(
                f,
                "No feasible assignment: {unrouted} locations cannot be routed within bound {upper_bound}"
            ),
        }
    }
}

impl std::error::Error for RoutingError {}
