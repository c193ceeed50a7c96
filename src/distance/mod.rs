//! Cost matrices.
//!
//! Provides the validated dense cost matrix the engine reads transit costs from.

mod matrix;

pub use matrix::CostMatrix;
