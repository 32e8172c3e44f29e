//! Serializable company state
//!
//! The persisted layout (clients, then vehicles tagged by `type`) is read
//! back into fresh entities through the validated constructors, so anything
//! that was valid when saved loads again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freight_types::ValidationError;

use super::client::Client;
use super::vehicle::{CargoCarrier, Vehicle, VehicleId};

/// Name used when a data file carries none
pub const DEFAULT_COMPANY_NAME: &str = "Fast Delivery";

fn default_company_name() -> String {
    DEFAULT_COMPANY_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    #[serde(default = "default_company_name")]
    pub name: String,
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,
    pub cargo_weight: f64,
    #[serde(default)]
    pub is_vip: bool,
}

impl From<&Client> for ClientRecord {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name().to_string(),
            cargo_weight: client.cargo_weight(),
            is_vip: client.is_vip(),
        }
    }
}

impl TryFrom<ClientRecord> for Client {
    type Error = ValidationError;

    fn try_from(record: ClientRecord) -> Result<Self, Self::Error> {
        Client::new(record.name, record.cargo_weight, record.is_vip)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vehicle_id: String,
    pub capacity: f64,
    #[serde(default)]
    pub current_load: f64,
    #[serde(flatten)]
    pub kind: VehicleKindRecord,
    /// Client list positions, in load order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_clients: Vec<usize>,
}

/// Variant tag plus variant-specific field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VehicleKindRecord {
    Airplane {
        max_altitude: f64,
    },
    Van {
        #[serde(default)]
        is_refrigerated: bool,
    },
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        let kind = match vehicle {
            Vehicle::Airplane(a) => VehicleKindRecord::Airplane {
                max_altitude: a.max_altitude(),
            },
            Vehicle::Van(v) => VehicleKindRecord::Van {
                is_refrigerated: v.is_refrigerated(),
            },
        };
        Self {
            vehicle_id: vehicle.id().to_string(),
            capacity: vehicle.capacity(),
            current_load: vehicle.current_load(),
            kind,
            assigned_clients: vehicle.assigned_clients().iter().map(|id| id.index()).collect(),
        }
    }
}

impl VehicleRecord {
    /// Build an empty vehicle from the record; loads are replayed separately
    pub fn to_vehicle(&self) -> Result<Vehicle, ValidationError> {
        let id = VehicleId::new(self.vehicle_id.clone())?;
        match self.kind {
            VehicleKindRecord::Airplane { max_altitude } => {
                Vehicle::airplane(id, self.capacity, max_altitude)
            }
            VehicleKindRecord::Van { is_refrigerated } => {
                Vehicle::van(id, self.capacity, is_refrigerated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_layout() {
        let json = r#"{
            "clients": [
                {"name": "Ivanov", "cargo_weight": 15, "is_vip": true},
                {"name": "Petrov", "cargo_weight": 8.0, "is_vip": false}
            ],
            "vehicles": [
                {"vehicle_id": "3f2a9c1b", "capacity": 50, "current_load": 0.0,
                 "type": "airplane", "max_altitude": 12000},
                {"vehicle_id": "77aa01de", "capacity": 10, "current_load": 0.0,
                 "type": "van", "is_refrigerated": true}
            ]
        }"#;
        let snapshot: CompanySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.name, DEFAULT_COMPANY_NAME);
        assert_eq!(snapshot.clients.len(), 2);
        assert_eq!(
            snapshot.vehicles[0].kind,
            VehicleKindRecord::Airplane { max_altitude: 12000.0 }
        );
        assert_eq!(
            snapshot.vehicles[1].kind,
            VehicleKindRecord::Van { is_refrigerated: true }
        );
        assert!(snapshot.vehicles[1].assigned_clients.is_empty());
        assert!(snapshot.saved_at.is_none());
    }

    #[test]
    fn test_unknown_vehicle_type_rejected() {
        let json = r#"{"vehicle_id": "x", "capacity": 5, "type": "truck"}"#;
        assert!(serde_json::from_str::<VehicleRecord>(json).is_err());
    }

    #[test]
    fn test_vehicle_record_serializes_type_tag() {
        let vehicle = Vehicle::van(VehicleId::new("V-0001").unwrap(), 8.0, false).unwrap();
        let value = serde_json::to_value(VehicleRecord::from(&vehicle)).unwrap();
        assert_eq!(value["type"], "van");
        assert_eq!(value["vehicle_id"], "V-0001");
        assert_eq!(value["is_refrigerated"], false);
        assert!(value.get("assigned_clients").is_none());
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let record = VehicleRecord {
            vehicle_id: "A1".to_string(),
            capacity: 10.0,
            current_load: 0.0,
            kind: VehicleKindRecord::Airplane { max_altitude: 0.0 },
            assigned_clients: Vec::new(),
        };
        assert_eq!(
            record.to_vehicle().unwrap_err(),
            ValidationError::InvalidAltitude(0.0)
        );

        let client = ClientRecord {
            name: "".to_string(),
            cargo_weight: 1.0,
            is_vip: false,
        };
        assert!(Client::try_from(client).is_err());
    }
}
