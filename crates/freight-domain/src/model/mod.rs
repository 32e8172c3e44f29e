//! Domain model types

pub mod client;
pub mod company;
pub mod ledger;
pub mod snapshot;
pub mod vehicle;

pub use client::{Client, ClientId};
pub use company::TransportCompany;
pub use ledger::CapacityLedger;
pub use snapshot::{
    ClientRecord, CompanySnapshot, VehicleKindRecord, VehicleRecord, DEFAULT_COMPANY_NAME,
};
pub use vehicle::{Airplane, CargoCarrier, Van, Vehicle, VehicleId, VehicleKind};
