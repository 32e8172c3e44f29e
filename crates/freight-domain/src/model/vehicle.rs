//! Vehicle definitions

use serde::{Deserialize, Serialize};

use freight_types::ValidationError;

use super::client::{is_positive, Client, ClientId};
use super::ledger::CapacityLedger;

/// Fleet-unique vehicle identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyVehicleId);
        }
        Ok(Self(id))
    }

    /// Id produced by the company counter (`V-0001`, `V-0002`, ...)
    pub fn from_sequence(n: u32) -> Self {
        Self(format!("V-{:04}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Airplane,
    Van,
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Airplane => "Airplane",
            VehicleKind::Van => "Van",
        }
    }
}

/// Load/unload capability shared by every vehicle kind
pub trait CargoCarrier {
    fn ledger(&self) -> &CapacityLedger;

    fn ledger_mut(&mut self) -> &mut CapacityLedger;

    fn capacity(&self) -> f64 {
        self.ledger().capacity()
    }

    fn current_load(&self) -> f64 {
        self.ledger().current_load()
    }

    fn free_capacity(&self) -> f64 {
        self.ledger().free_capacity()
    }

    fn assigned_clients(&self) -> &[ClientId] {
        self.ledger().assigned_clients()
    }

    /// Load a client's cargo; `false` means it did not fit and nothing changed
    fn load(&mut self, id: ClientId, client: &Client) -> bool {
        self.ledger_mut().load(id, client.cargo_weight())
    }

    fn unload(&mut self) {
        self.ledger_mut().unload();
    }
}

/// Cargo airplane
#[derive(Debug, Clone, PartialEq)]
pub struct Airplane {
    id: VehicleId,
    /// Maximum flight altitude in metres
    max_altitude: f64,
    ledger: CapacityLedger,
}

impl Airplane {
    pub fn new(id: VehicleId, capacity: f64, max_altitude: f64) -> Result<Self, ValidationError> {
        let ledger = CapacityLedger::new(capacity)?;
        if !is_positive(max_altitude) {
            return Err(ValidationError::InvalidAltitude(max_altitude));
        }
        Ok(Self {
            id,
            max_altitude,
            ledger,
        })
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }
}

impl CargoCarrier for Airplane {
    fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut CapacityLedger {
        &mut self.ledger
    }
}

/// Delivery van
#[derive(Debug, Clone, PartialEq)]
pub struct Van {
    id: VehicleId,
    is_refrigerated: bool,
    ledger: CapacityLedger,
}

impl Van {
    pub fn new(id: VehicleId, capacity: f64, is_refrigerated: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            is_refrigerated,
            ledger: CapacityLedger::new(capacity)?,
        })
    }

    pub fn is_refrigerated(&self) -> bool {
        self.is_refrigerated
    }
}

impl CargoCarrier for Van {
    fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut CapacityLedger {
        &mut self.ledger
    }
}

/// Any vehicle of the fleet
#[derive(Debug, Clone, PartialEq)]
pub enum Vehicle {
    Airplane(Airplane),
    Van(Van),
}

impl Vehicle {
    pub fn airplane(id: VehicleId, capacity: f64, max_altitude: f64) -> Result<Self, ValidationError> {
        Airplane::new(id, capacity, max_altitude).map(Vehicle::Airplane)
    }

    pub fn van(id: VehicleId, capacity: f64, is_refrigerated: bool) -> Result<Self, ValidationError> {
        Van::new(id, capacity, is_refrigerated).map(Vehicle::Van)
    }

    pub fn id(&self) -> &VehicleId {
        match self {
            Vehicle::Airplane(a) => &a.id,
            Vehicle::Van(v) => &v.id,
        }
    }

    pub fn kind(&self) -> VehicleKind {
        match self {
            Vehicle::Airplane(_) => VehicleKind::Airplane,
            Vehicle::Van(_) => VehicleKind::Van,
        }
    }

    /// Whether a client handle is in this vehicle's load list
    pub fn carries(&self, id: ClientId) -> bool {
        self.assigned_clients().contains(&id)
    }

    pub(crate) fn set_id(&mut self, id: VehicleId) {
        match self {
            Vehicle::Airplane(a) => a.id = id,
            Vehicle::Van(v) => v.id = id,
        }
    }
}

impl CargoCarrier for Vehicle {
    fn ledger(&self) -> &CapacityLedger {
        match self {
            Vehicle::Airplane(a) => a.ledger(),
            Vehicle::Van(v) => v.ledger(),
        }
    }

    fn ledger_mut(&mut self) -> &mut CapacityLedger {
        match self {
            Vehicle::Airplane(a) => a.ledger_mut(),
            Vehicle::Van(v) => v.ledger_mut(),
        }
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ledger = self.ledger();
        let base = format!(
            "ID: {}, capacity: {}t, loaded: {}t, free: {}t, clients: {}",
            self.id(),
            ledger.capacity(),
            ledger.current_load(),
            ledger.free_capacity(),
            ledger.assigned_clients().len()
        );
        match self {
            Vehicle::Airplane(a) => write!(f, "Airplane - {}, max altitude: {}m", base, a.max_altitude),
            Vehicle::Van(v) => {
                let cooling = if v.is_refrigerated {
                    "refrigerated"
                } else {
                    "not refrigerated"
                };
                write!(f, "Van ({}) - {}", cooling, base)
            }
        }
    }
}
