//! Demo fleet and client list

use freight_domain::model::{Client, TransportCompany};
use freight_types::ValidationError;

/// Demo vehicle
#[derive(Debug, Clone, Copy)]
pub enum DemoVehicle {
    /// capacity (t), max altitude (m)
    Airplane(f64, f64),
    /// capacity (t), refrigerated
    Van(f64, bool),
}

pub const DEMO_FLEET: &[DemoVehicle] = &[
    DemoVehicle::Airplane(50.0, 12000.0),
    DemoVehicle::Airplane(30.0, 10000.0),
    DemoVehicle::Van(10.0, true),
    DemoVehicle::Van(8.0, false),
    DemoVehicle::Van(5.0, true),
];

/// name, cargo weight (t), VIP
pub const DEMO_CLIENTS: &[(&str, f64, bool)] = &[
    ("Ivan Ivanov", 15.0, true),
    ("Petr Petrov", 8.0, false),
    ("Alexey Sidorov", 12.0, true),
    ("Maria Kuznetsova", 5.0, false),
    ("Romashka LLC", 25.0, false),
    ("Vesna JSC", 7.0, true),
    ("Dmitry Smirnov", 3.0, false),
];

/// Build a company pre-filled with the demo fleet and clients
pub fn demo_company(name: &str) -> Result<TransportCompany, ValidationError> {
    let mut company = TransportCompany::new(name)?;
    for vehicle in DEMO_FLEET {
        match *vehicle {
            DemoVehicle::Airplane(capacity, altitude) => {
                company.register_airplane(capacity, altitude)?;
            }
            DemoVehicle::Van(capacity, refrigerated) => {
                company.register_van(capacity, refrigerated)?;
            }
        }
    }
    for &(name, weight, vip) in DEMO_CLIENTS {
        company.add_client(Client::new(name, weight, vip)?);
    }
    Ok(company)
}
