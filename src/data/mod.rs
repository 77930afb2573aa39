//! Trajectory loading and validation.

pub mod error;
pub mod store;

pub use error::{TrajectoryError, TrajectoryResult};
pub use store::{Bounds, ColumnKeys, Trajectory};
