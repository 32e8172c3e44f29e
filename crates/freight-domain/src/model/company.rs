//! Transport company aggregate
//!
//! Owns the canonical client list and the fleet. Vehicles only hold
//! `ClientId` handles into the client list.

use std::collections::HashSet;

use tracing::{debug, warn};

use freight_types::{AssignmentPolicy, Error, Result, ValidationError};

use super::client::{Client, ClientId};
use super::snapshot::{ClientRecord, CompanySnapshot, VehicleRecord};
use super::vehicle::{CargoCarrier, Vehicle, VehicleId};
use crate::service::distribution::{self, DistributionResult, VehicleAssignment};
use crate::service::statistics::{compute_statistics, StatisticsSnapshot};

/// Tolerance when comparing a replayed load with the recorded one
const LOAD_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportCompany {
    name: String,
    clients: Vec<Client>,
    vehicles: Vec<Vehicle>,
    next_vehicle_seq: u32,
}

impl TransportCompany {
    pub fn new(name: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyCompanyName);
        }
        Ok(Self {
            name,
            clients: Vec::new(),
            vehicles: Vec::new(),
            next_vehicle_seq: 1,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(id.index())
    }

    pub fn vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    // ---- clients ----

    pub fn add_client(&mut self, client: Client) -> ClientId {
        self.clients.push(client);
        ClientId::new(self.clients.len() - 1)
    }

    /// Replace a client in place; current loads are dropped
    pub fn replace_client(&mut self, id: ClientId, client: Client) -> Result<Client> {
        let slot = self
            .clients
            .get_mut(id.index())
            .ok_or(Error::ClientNotFound(id.index() + 1))?;
        let previous = std::mem::replace(slot, client);
        self.unload_all();
        Ok(previous)
    }

    /// Remove a client; later handles shift, so current loads are dropped
    pub fn remove_client(&mut self, id: ClientId) -> Result<Client> {
        if id.index() >= self.clients.len() {
            return Err(Error::ClientNotFound(id.index() + 1));
        }
        let removed = self.clients.remove(id.index());
        self.unload_all();
        Ok(removed)
    }

    // ---- vehicles ----

    /// Register a vehicle; its id must not be in use
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> std::result::Result<(), ValidationError> {
        if self.vehicle(vehicle.id()).is_some() {
            return Err(ValidationError::DuplicateVehicleId(vehicle.id().to_string()));
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Next free id from the company counter
    pub fn next_vehicle_id(&mut self) -> VehicleId {
        loop {
            let id = VehicleId::from_sequence(self.next_vehicle_seq);
            self.next_vehicle_seq += 1;
            if self.vehicle(&id).is_none() {
                return id;
            }
        }
    }

    pub fn register_airplane(
        &mut self,
        capacity: f64,
        max_altitude: f64,
    ) -> std::result::Result<VehicleId, ValidationError> {
        let vehicle = Vehicle::airplane(self.peek_vehicle_id(), capacity, max_altitude)?;
        self.push_with_counter_id(vehicle)
    }

    pub fn register_van(
        &mut self,
        capacity: f64,
        is_refrigerated: bool,
    ) -> std::result::Result<VehicleId, ValidationError> {
        let vehicle = Vehicle::van(self.peek_vehicle_id(), capacity, is_refrigerated)?;
        self.push_with_counter_id(vehicle)
    }

    /// Swap in a new vehicle under an existing id
    ///
    /// Clients carried by the old vehicle become unassigned.
    pub fn replace_vehicle(&mut self, id: &VehicleId, mut replacement: Vehicle) -> Result<Vehicle> {
        let slot = self
            .vehicles
            .iter_mut()
            .find(|v| v.id() == id)
            .ok_or_else(|| Error::VehicleNotFound(id.to_string()))?;
        replacement.set_id(id.clone());
        replacement.unload();
        Ok(std::mem::replace(slot, replacement))
    }

    pub fn remove_vehicle(&mut self, id: &VehicleId) -> Result<Vehicle> {
        let pos = self
            .vehicles
            .iter()
            .position(|v| v.id() == id)
            .ok_or_else(|| Error::VehicleNotFound(id.to_string()))?;
        Ok(self.vehicles.remove(pos))
    }

    /// Human-readable vehicle summaries, in fleet order
    pub fn list_vehicles(&self) -> Vec<String> {
        self.vehicles.iter().map(|v| v.to_string()).collect()
    }

    /// Drop all clients and vehicles
    pub fn clear(&mut self) {
        self.clients.clear();
        self.vehicles.clear();
        self.next_vehicle_seq = 1;
    }

    pub fn unload_all(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.unload();
        }
    }

    // ---- distribution & reporting ----

    /// Run the default first-fit-descending distribution
    pub fn distribute(&mut self) -> DistributionResult {
        self.distribute_with(AssignmentPolicy::default())
    }

    pub fn distribute_with(&mut self, policy: AssignmentPolicy) -> DistributionResult {
        distribution::distribute(&self.clients, &mut self.vehicles, policy)
    }

    pub fn statistics(&self) -> StatisticsSnapshot {
        compute_statistics(&self.name, &self.clients, &self.vehicles)
    }

    /// Vehicle currently carrying the client, if any
    pub fn vehicle_for_client(&self, id: ClientId) -> Option<&VehicleId> {
        self.vehicles.iter().find(|v| v.carries(id)).map(|v| v.id())
    }

    /// Current per-vehicle loads, in fleet order
    pub fn assignments(&self) -> Vec<VehicleAssignment> {
        self.vehicles
            .iter()
            .map(|v| VehicleAssignment::of(v, &self.clients))
            .collect()
    }

    pub fn total_cargo(&self) -> f64 {
        self.clients.iter().map(Client::cargo_weight).sum()
    }

    pub fn has_assignments(&self) -> bool {
        self.vehicles.iter().any(|v| !v.assigned_clients().is_empty())
    }

    // ---- persistence ----

    pub fn snapshot(&self) -> CompanySnapshot {
        CompanySnapshot {
            name: self.name.clone(),
            clients: self.clients.iter().map(ClientRecord::from).collect(),
            vehicles: self.vehicles.iter().map(VehicleRecord::from).collect(),
            saved_at: None,
        }
    }

    /// Rebuild a company from persisted state
    ///
    /// Recorded assignments are replayed through the ledgers. A vehicle whose
    /// record cannot be replayed without breaking the ledger invariants is
    /// restored empty.
    pub fn restore(snapshot: CompanySnapshot) -> std::result::Result<Self, ValidationError> {
        let mut company = Self::new(snapshot.name)?;
        for record in snapshot.clients {
            company.add_client(Client::try_from(record)?);
        }

        let mut claimed = HashSet::new();
        for record in &snapshot.vehicles {
            company.add_vehicle(record.to_vehicle()?)?;
            let slot = company.vehicles.len() - 1;
            company.replay(slot, record, &mut claimed);
        }

        debug!(
            company = company.name(),
            clients = company.clients.len(),
            vehicles = company.vehicles.len(),
            "company restored"
        );
        Ok(company)
    }

    fn replay(&mut self, slot: usize, record: &VehicleRecord, claimed: &mut HashSet<usize>) {
        let vehicle = &mut self.vehicles[slot];

        if record.assigned_clients.is_empty() {
            if record.current_load > 0.0 {
                warn!(
                    vehicle = %vehicle.id(),
                    recorded_load = record.current_load,
                    "recorded load has no client list; vehicle restored empty"
                );
            }
            return;
        }

        let mut newly_claimed = Vec::new();
        let mut problem = None;
        for &index in &record.assigned_clients {
            let Some(client) = self.clients.get(index) else {
                problem = Some(format!("unknown client index {}", index));
                break;
            };
            if claimed.contains(&index) || newly_claimed.contains(&index) {
                problem = Some(format!("client index {} already assigned", index));
                break;
            }
            if !vehicle.load(ClientId::new(index), client) {
                problem = Some(format!("client index {} exceeds capacity", index));
                break;
            }
            newly_claimed.push(index);
        }

        if problem.is_none() && (vehicle.current_load() - record.current_load).abs() > LOAD_TOLERANCE {
            problem = Some(format!(
                "recorded load {} does not match replayed load {}",
                record.current_load,
                vehicle.current_load()
            ));
        }

        match problem {
            Some(reason) => {
                warn!(vehicle = %vehicle.id(), %reason, "assignment not restored");
                vehicle.unload();
            }
            None => claimed.extend(newly_claimed),
        }
    }

    fn peek_vehicle_id(&self) -> VehicleId {
        let mut seq = self.next_vehicle_seq;
        loop {
            let id = VehicleId::from_sequence(seq);
            if self.vehicle(&id).is_none() {
                return id;
            }
            seq += 1;
        }
    }

    /// Add a vehicle built with `peek_vehicle_id` and advance the counter
    fn push_with_counter_id(&mut self, vehicle: Vehicle) -> std::result::Result<VehicleId, ValidationError> {
        let id = self.next_vehicle_id();
        debug_assert_eq!(&id, vehicle.id());
        self.add_vehicle(vehicle)?;
        Ok(id)
    }
}

impl std::fmt::Display for TransportCompany {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.statistics();
        writeln!(f, "Transport company: {}", stats.company_name)?;
        writeln!(f, "Vehicles: {}", stats.total_vehicles)?;
        writeln!(
            f,
            "Clients: {} (VIP: {}, regular: {})",
            stats.total_clients, stats.vip_clients, stats.regular_clients
        )?;
        writeln!(f, "Total capacity: {:.2}t", stats.total_capacity)?;
        write!(
            f,
            "Loaded: {:.2}t ({:.1}%)",
            stats.used_capacity, stats.utilization_percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::snapshot::VehicleKindRecord;

    fn company() -> TransportCompany {
        TransportCompany::new("Fast Delivery").unwrap()
    }

    fn demo_company() -> TransportCompany {
        let mut c = company();
        c.register_airplane(50.0, 12000.0).unwrap();
        c.register_airplane(30.0, 10000.0).unwrap();
        c.register_van(10.0, true).unwrap();
        c.register_van(8.0, false).unwrap();
        c.register_van(5.0, true).unwrap();
        for (name, weight, vip) in [
            ("Ivanov", 15.0, true),
            ("Petrov", 8.0, false),
            ("Sidorov", 12.0, true),
            ("Kuznetsova", 5.0, false),
            ("Romashka LLC", 25.0, false),
            ("Vesna JSC", 7.0, true),
            ("Smirnov", 3.0, false),
        ] {
            c.add_client(Client::new(name, weight, vip).unwrap());
        }
        c
    }

    #[test]
    fn test_blank_company_name_rejected() {
        assert_eq!(
            TransportCompany::new("  ").unwrap_err(),
            ValidationError::EmptyCompanyName
        );
    }

    #[test]
    fn test_counter_ids_are_sequential() {
        let mut c = company();
        let a = c.register_airplane(50.0, 12000.0).unwrap();
        let b = c.register_van(10.0, false).unwrap();
        assert_eq!(a.as_str(), "V-0001");
        assert_eq!(b.as_str(), "V-0002");
    }

    #[test]
    fn test_counter_skips_taken_ids() {
        let mut c = company();
        c.add_vehicle(Vehicle::van(VehicleId::from_sequence(1), 5.0, false).unwrap())
            .unwrap();
        let id = c.register_van(5.0, false).unwrap();
        assert_eq!(id.as_str(), "V-0002");
    }

    #[test]
    fn test_failed_registration_keeps_counter() {
        let mut c = company();
        assert!(c.register_van(-1.0, false).is_err());
        assert!(c.vehicles().is_empty());
        assert_eq!(c.register_van(1.0, false).unwrap().as_str(), "V-0001");
    }

    #[test]
    fn test_duplicate_vehicle_id_rejected() {
        let mut c = company();
        let id = VehicleId::new("A1").unwrap();
        c.add_vehicle(Vehicle::van(id.clone(), 5.0, false).unwrap()).unwrap();
        let err = c
            .add_vehicle(Vehicle::airplane(id, 9.0, 1000.0).unwrap())
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateVehicleId("A1".to_string()));
        assert_eq!(c.vehicles().len(), 1);
    }

    #[test]
    fn test_demo_distribution() {
        let mut c = demo_company();
        let result = c.distribute();

        // VIP 15, 12, 7 then regular 25, 8, 5, 3 all fit into 103t
        assert!(result.is_complete());
        assert_eq!(result.successful.len(), 7);
        assert!((result.total_cargo - 75.0).abs() < 0.01);
        assert!((result.cargo_distributed - 75.0).abs() < 0.01);
        assert_eq!(result.vehicles_used, 2);

        let stats = c.statistics();
        assert!((stats.used_capacity - 75.0).abs() < 0.01);
        assert!((stats.utilization_percentage - 75.0 / 103.0 * 100.0).abs() < 0.01);
    }

    #[test]
    fn test_vehicle_for_client() {
        let mut c = demo_company();
        assert!(c.vehicle_for_client(ClientId::new(0)).is_none());
        c.distribute();
        // Ivanov (VIP, 15t) is loaded first into the 50t airplane
        assert_eq!(c.vehicle_for_client(ClientId::new(0)).unwrap().as_str(), "V-0001");
        assert!(c.vehicle_for_client(ClientId::new(99)).is_none());
    }

    #[test]
    fn test_each_client_in_at_most_one_vehicle() {
        let mut c = demo_company();
        c.distribute();
        for index in 0..c.clients().len() {
            let carriers = c
                .vehicles()
                .iter()
                .filter(|v| v.carries(ClientId::new(index)))
                .count();
            assert!(carriers <= 1);
        }
    }

    #[test]
    fn test_remove_client_drops_assignments() {
        let mut c = demo_company();
        c.distribute();
        assert!(c.has_assignments());

        let removed = c.remove_client(ClientId::new(1)).unwrap();
        assert_eq!(removed.name(), "Petrov");
        assert_eq!(c.clients().len(), 6);
        assert!(!c.has_assignments());
        assert!(matches!(
            c.remove_client(ClientId::new(6)),
            Err(Error::ClientNotFound(7))
        ));
    }

    #[test]
    fn test_replace_client_drops_assignments() {
        let mut c = demo_company();
        c.distribute();
        let old = c
            .replace_client(ClientId::new(0), Client::regular("Ivanov", 1.0).unwrap())
            .unwrap();
        assert!(old.is_vip());
        assert!(!c.client(ClientId::new(0)).unwrap().is_vip());
        assert!(!c.has_assignments());
    }

    #[test]
    fn test_replace_and_remove_vehicle() {
        let mut c = demo_company();
        c.distribute();
        let id = VehicleId::from_sequence(1);
        let replacement = Vehicle::van(VehicleId::new("ignored").unwrap(), 60.0, true).unwrap();
        let old = c.replace_vehicle(&id, replacement).unwrap();
        assert!(!old.assigned_clients().is_empty());

        let now = c.vehicle(&id).unwrap();
        assert_eq!(now.kind(), crate::model::VehicleKind::Van);
        assert!(now.assigned_clients().is_empty());
        assert!(c.vehicle(&VehicleId::new("ignored").unwrap()).is_none());

        c.remove_vehicle(&id).unwrap();
        assert_eq!(c.vehicles().len(), 4);
        assert!(matches!(c.remove_vehicle(&id), Err(Error::VehicleNotFound(_))));
    }

    #[test]
    fn test_list_vehicles() {
        let c = demo_company();
        let listed = c.list_vehicles();
        assert_eq!(listed.len(), 5);
        assert!(listed[0].starts_with("Airplane - ID: V-0001"));
        assert!(listed[2].starts_with("Van (refrigerated) - ID: V-0003"));
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut c = demo_company();
        c.clear();
        assert!(c.clients().is_empty());
        assert!(c.vehicles().is_empty());
        assert_eq!(c.register_van(3.0, false).unwrap().as_str(), "V-0001");
    }

    #[test]
    fn test_snapshot_round_trip_keeps_assignments() {
        let mut c = demo_company();
        c.distribute();
        let restored = TransportCompany::restore(c.snapshot()).unwrap();

        assert_eq!(restored.clients(), c.clients());
        assert_eq!(restored.vehicles(), c.vehicles());
        assert_eq!(restored.statistics(), c.statistics());
    }

    #[test]
    fn test_restore_rejects_capacity_overflow() {
        let mut c = demo_company();
        c.distribute();
        let mut snapshot = c.snapshot();
        // Move Romashka (25t) from the second airplane onto the 5t van
        snapshot.vehicles[1].assigned_clients.clear();
        snapshot.vehicles[1].current_load = 0.0;
        snapshot.vehicles[4].assigned_clients = vec![4];
        snapshot.vehicles[4].current_load = 25.0;

        let restored = TransportCompany::restore(snapshot).unwrap();
        assert!(restored.vehicles()[4].assigned_clients().is_empty());
        assert!(restored.vehicles()[4].current_load().abs() < f64::EPSILON);
        assert_eq!(restored.vehicle_for_client(ClientId::new(4)), None);
        assert!(!restored.vehicles()[0].assigned_clients().is_empty());
    }

    #[test]
    fn test_restore_rejects_client_claimed_twice() {
        let mut c = demo_company();
        c.distribute();
        let mut snapshot = c.snapshot();
        // Smirnov (3t) already rides the first airplane; the 10t van has room
        assert!(snapshot.vehicles[0].assigned_clients.contains(&6));
        snapshot.vehicles[2].assigned_clients = vec![6];
        snapshot.vehicles[2].current_load = 3.0;

        let restored = TransportCompany::restore(snapshot).unwrap();
        assert!(restored.vehicles()[2].assigned_clients().is_empty());
        assert!(restored.vehicles()[2].current_load().abs() < f64::EPSILON);
        assert!(restored.vehicles()[0].carries(ClientId::new(6)));
        assert!((restored.vehicles()[0].current_load() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_restore_rejects_unknown_client_index() {
        let mut c = demo_company();
        c.distribute();
        let mut snapshot = c.snapshot();
        snapshot.vehicles[2].assigned_clients = vec![99];
        snapshot.vehicles[2].current_load = 3.0;

        let restored = TransportCompany::restore(snapshot).unwrap();
        assert!(restored.vehicles()[2].assigned_clients().is_empty());
        assert!((restored.statistics().used_capacity - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_restore_rejects_recorded_load_mismatch() {
        let mut c = demo_company();
        c.distribute();
        let mut snapshot = c.snapshot();
        // Romashka (25t) alone on the second airplane, recorded as 24t
        assert_eq!(snapshot.vehicles[1].assigned_clients, vec![4]);
        snapshot.vehicles[1].current_load = 24.0;

        let restored = TransportCompany::restore(snapshot).unwrap();
        assert!(restored.vehicles()[1].assigned_clients().is_empty());
        assert_eq!(restored.vehicle_for_client(ClientId::new(4)), None);
        assert!(restored.vehicles()[0].carries(ClientId::new(0)));
    }

    #[test]
    fn test_restore_ignores_load_without_clients() {
        let snapshot = CompanySnapshot {
            name: "Legacy".to_string(),
            clients: vec![],
            vehicles: vec![VehicleRecord {
                vehicle_id: "ab12cd34".to_string(),
                capacity: 10.0,
                current_load: 4.0,
                kind: VehicleKindRecord::Van {
                    is_refrigerated: false,
                },
                assigned_clients: vec![],
            }],
            saved_at: None,
        };
        let restored = TransportCompany::restore(snapshot).unwrap();
        assert!(restored.vehicles()[0].current_load().abs() < f64::EPSILON);
    }

    #[test]
    fn test_restore_rejects_invalid_client() {
        let snapshot = CompanySnapshot {
            name: "Broken".to_string(),
            clients: vec![ClientRecord {
                name: "Ghost".to_string(),
                cargo_weight: -2.0,
                is_vip: false,
            }],
            vehicles: vec![],
            saved_at: None,
        };
        assert_eq!(
            TransportCompany::restore(snapshot).unwrap_err(),
            ValidationError::InvalidCargoWeight(-2.0)
        );
    }

    #[test]
    fn test_display_summary() {
        let c = demo_company();
        let text = c.to_string();
        assert!(text.contains("Transport company: Fast Delivery"));
        assert!(text.contains("Clients: 7 (VIP: 3, regular: 4)"));
        assert!(text.contains("Total capacity: 103.00t"));
    }
}
