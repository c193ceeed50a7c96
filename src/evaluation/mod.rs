//! Cost evaluation and the distance dimension.
//!
//! - [`ArcCostEvaluator`] — transit cost between two route positions
//! - [`DistanceDimension`] — per-route bound and span-weighted objective
//! - [`RouteCumuls`] — cumulative distance along one route

mod dimension;
mod evaluator;

pub use dimension::{DistanceDimension, RouteCumuls, DISTANCE_DIMENSION};
pub use evaluator::ArcCostEvaluator;
