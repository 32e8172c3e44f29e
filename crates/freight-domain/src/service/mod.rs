//! Domain services

pub mod distribution;
pub mod statistics;

pub use distribution::{distribute, DistributionResult, VehicleAssignment};
pub use statistics::{compute_statistics, StatisticsSnapshot};
