//! Constructive heuristics for building initial multi-depot solutions.
//!
//! - [`path_cheapest_arc`] — Global cheapest-arc route growth from every
//!   vehicle's start, bounded by the distance dimension, O(K² × V)

mod cheapest_arc;

pub use cheapest_arc::path_cheapest_arc;
