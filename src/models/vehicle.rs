//! Vehicles and fleets.

use crate::error::{RoutingError, RoutingResult, VehicleSpecDefect};

/// A vehicle with its own start and end depot.
///
/// The route of a vehicle always begins at `start` and always ends at `end`.
/// The two locations are independent and may coincide.
///
/// # Examples
///
/// ```
/// use md_routing::models::Vehicle;
///
/// let v = Vehicle::new(0, 1, 0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.start(), 1);
/// assert_eq!(v.end(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    start: usize,
    end: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given start and end locations.
    pub fn new(id: usize, start: usize, end: usize) -> Self {
        Self { id, start, end }
    }

    /// Creates a vehicle that starts and ends at the same depot.
    pub fn round_trip(id: usize, depot: usize) -> Self {
        Self::new(id, depot, depot)
    }

    /// Vehicle ID (its index in the fleet).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Start location.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End location.
    pub fn end(&self) -> usize {
        self.end
    }
}

/// An ordered, non-empty sequence of vehicles.
///
/// Vehicle IDs always equal their position in the fleet.
///
/// # Examples
///
/// ```
/// use md_routing::models::Fleet;
///
/// let fleet = Fleet::from_depots(&[1, 2, 15, 16], &[0, 0, 0, 0]).unwrap();
/// assert_eq!(fleet.len(), 4);
/// assert_eq!(fleet.vehicles()[2].start(), 15);
///
/// let same = Fleet::uniform(4, 1, 0).unwrap();
/// assert!(same.vehicles().iter().all(|v| v.start() == 1 && v.end() == 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// Builds a fleet from parallel start and end lists.
    ///
    /// Location ranges are checked later, against the cost matrix, by the
    /// [`IndexManager`](crate::models::IndexManager).
    pub fn from_depots(starts: &[usize], ends: &[usize]) -> RoutingResult<Self> {
        if starts.len() != ends.len() {
            return Err(RoutingError::InvalidVehicleSpec {
                vehicle: None,
                num_locations: 0,
                defect: VehicleSpecDefect::LengthMismatch {
                    vehicles: starts.len().max(ends.len()),
                    starts: starts.len(),
                    ends: ends.len(),
                },
            });
        }
        if starts.is_empty() {
            return Err(empty_fleet());
        }
        let vehicles = starts
            .iter()
            .zip(ends)
            .enumerate()
            .map(|(id, (&start, &end))| Vehicle::new(id, start, end))
            .collect();
        Ok(Self { vehicles })
    }

    /// Builds `count` vehicles that all share one start and one end depot.
    pub fn uniform(count: usize, start: usize, end: usize) -> RoutingResult<Self> {
        if count == 0 {
            return Err(empty_fleet());
        }
        let vehicles = (0..count).map(|id| Vehicle::new(id, start, end)).collect();
        Ok(Self { vehicles })
    }

    /// The vehicles, in ID order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Always `false`: a fleet holds at least one vehicle.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

fn empty_fleet() -> RoutingError {
    RoutingError::InvalidVehicleSpec {
        vehicle: None,
        num_locations: 0,
        defect: VehicleSpecDefect::EmptyFleet,
    }
}
