//! Cargo distribution domain
//!
//! Clients, vehicles and their capacity ledgers, the greedy distribution
//! engine, fleet statistics, and the persistence traits implemented by the
//! infrastructure layer.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{
    Airplane, CapacityLedger, CargoCarrier, Client, ClientId, CompanySnapshot, TransportCompany,
    Van, Vehicle, VehicleId, VehicleKind,
};
pub use service::{DistributionResult, StatisticsSnapshot, VehicleAssignment};
