//! Mapping between locations and internal route positions.
//!
//! Search works on [`RoutePosition`]s, not on raw locations. Every non-depot
//! location owns exactly one position. Every vehicle owns one start position
//! and one end position of its own, even when several vehicles share a depot
//! location, so that each route can be built independently.
//!
//! Layout of the position arena:
//!
//! ```text
//! [ visit positions (K) | vehicle starts (V) | vehicle ends (V) ]
//! ```

use super::Fleet;
use crate::error::{RoutingError, RoutingResult, VehicleSpecDefect};
use std::fmt;

/// An internal route position.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutePosition(usize);

impl RoutePosition {
    /// Wraps a raw position index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw position index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for RoutePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoutePosition({})", self.0)
    }
}

impl fmt::Display for RoutePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoutePosition({})", self.0)
    }
}

impl From<RoutePosition> for usize {
    fn from(position: RoutePosition) -> Self {
        position.0
    }
}

/// What a position stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionRole {
    /// A location that must be visited by exactly one route.
    Visit,
    /// The start of the given vehicle's route.
    Start(usize),
    /// The end of the given vehicle's route.
    End(usize),
}

/// Bidirectional mapping between locations and route positions.
///
/// # Examples
///
/// ```
/// use md_routing::models::{Fleet, IndexManager};
///
/// // 4 locations, two vehicles both starting at 1 and ending at 0.
/// let fleet = Fleet::uniform(2, 1, 0).unwrap();
/// let manager = IndexManager::new(4, &fleet).unwrap();
///
/// assert_eq!(manager.num_visits(), 2); // locations 2 and 3
/// assert_ne!(manager.start(0), manager.start(1));
/// assert_eq!(manager.location_of(manager.start(1)), 1);
/// assert_eq!(manager.positions_for(0).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct IndexManager {
    num_locations: usize,
    num_vehicles: usize,
    num_visits: usize,
    locations: Vec<usize>,
    roles: Vec<PositionRole>,
    positions_by_location: Vec<Vec<RoutePosition>>,
}

impl IndexManager {
    /// Builds the position arena for `num_locations` locations and a fleet.
    ///
    /// Fails with [`RoutingError::InvalidVehicleSpec`] when any depot lies
    /// outside `[0, num_locations)`.
    pub fn new(num_locations: usize, fleet: &Fleet) -> RoutingResult<Self> {
        let num_vehicles = fleet.len();
        if num_vehicles == 0 {
            return Err(RoutingError::InvalidVehicleSpec {
                vehicle: None,
                num_locations,
                defect: VehicleSpecDefect::EmptyFleet,
            });
        }

        let mut is_depot = vec![false; num_locations];
        for vehicle in fleet.vehicles() {
            let out_of_range = |defect| RoutingError::InvalidVehicleSpec {
                vehicle: Some(vehicle.id()),
                num_locations,
                defect,
            };
            if vehicle.start() >= num_locations {
                return Err(out_of_range(VehicleSpecDefect::StartOutOfRange {
                    location: vehicle.start(),
                }));
            }
            if vehicle.end() >= num_locations {
                return Err(out_of_range(VehicleSpecDefect::EndOutOfRange {
                    location: vehicle.end(),
                }));
            }
            is_depot[vehicle.start()] = true;
            is_depot[vehicle.end()] = true;
        }

        let mut locations = Vec::with_capacity(num_locations + 2 * num_vehicles);
        let mut roles = Vec::with_capacity(locations.capacity());

        for (location, _) in is_depot.iter().enumerate().filter(|(_, d)| !**d) {
            locations.push(location);
            roles.push(PositionRole::Visit);
        }
        let num_visits = locations.len();

        for vehicle in fleet.vehicles() {
            locations.push(vehicle.start());
            roles.push(PositionRole::Start(vehicle.id()));
        }
        for vehicle in fleet.vehicles() {
            locations.push(vehicle.end());
            roles.push(PositionRole::End(vehicle.id()));
        }

        let mut positions_by_location = vec![Vec::new(); num_locations];
        for (index, &location) in locations.iter().enumerate() {
            positions_by_location[location].push(RoutePosition::new(index));
        }

        Ok(Self {
            num_locations,
            num_vehicles,
            num_visits,
            locations,
            roles,
            positions_by_location,
        })
    }

    /// Number of locations (N).
    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    /// Number of vehicles (V).
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Number of positions in the arena.
    pub fn num_positions(&self) -> usize {
        self.locations.len()
    }

    /// Number of positions that must be visited mid-route.
    pub fn num_visits(&self) -> usize {
        self.num_visits
    }

    /// Start position of a vehicle.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle >= num_vehicles()`.
    #[inline]
    pub fn start(&self, vehicle: usize) -> RoutePosition {
        assert!(vehicle < self.num_vehicles, "vehicle {vehicle} out of range");
        RoutePosition::new(self.num_visits + vehicle)
    }

    /// End position of a vehicle.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle >= num_vehicles()`.
    #[inline]
    pub fn end(&self, vehicle: usize) -> RoutePosition {
        assert!(vehicle < self.num_vehicles, "vehicle {vehicle} out of range");
        RoutePosition::new(self.num_visits + self.num_vehicles + vehicle)
    }

    /// Location a position stands for.
    #[inline]
    pub fn location_of(&self, position: RoutePosition) -> usize {
        self.locations[position.get()]
    }

    /// Role of a position.
    pub fn role_of(&self, position: RoutePosition) -> PositionRole {
        self.roles[position.get()]
    }

    /// All positions that stand for `location`.
    ///
    /// A depot shared by several vehicles resolves to one position per role
    /// and vehicle.
    pub fn positions_for(&self, location: usize) -> &[RoutePosition] {
        &self.positions_by_location[location]
    }

    /// Returns `true` if `position` is some vehicle's start.
    pub fn is_start(&self, position: RoutePosition) -> bool {
        matches!(self.role_of(position), PositionRole::Start(_))
    }

    /// Returns `true` if `position` is some vehicle's end.
    pub fn is_end(&self, position: RoutePosition) -> bool {
        matches!(self.role_of(position), PositionRole::End(_))
    }

    /// Returns `true` if `location` is a start or end of any vehicle.
    pub fn is_depot_location(&self, location: usize) -> bool {
        self.positions_by_location[location]
            .iter()
            .any(|&p| !matches!(self.role_of(p), PositionRole::Visit))
    }

    /// Iterates the visit positions in ascending location order.
    pub fn visit_positions(&self) -> impl Iterator<Item = RoutePosition> {
        (0..self.num_visits).map(RoutePosition::new)
    }
}
