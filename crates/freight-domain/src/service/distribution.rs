//! Greedy cargo distribution
//!
//! Every run starts from an empty fleet:
//! 1. Unload all vehicles
//! 2. Order clients VIP first, then by cargo weight (heaviest first)
//! 3. Order vehicles by capacity (largest first), once per run
//! 4. Place each client according to the selected policy
//! 5. Collect successes, failures and totals
//!
//! Both sorts are stable, so ties keep insertion order and a run is fully
//! reproducible for the same inputs.

use serde::Serialize;
use tracing::{debug, info};

use freight_types::AssignmentPolicy;

use crate::model::{CargoCarrier, Client, ClientId, Vehicle, VehicleId, VehicleKind};

/// Outcome of one distribution run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionResult {
    pub policy: AssignmentPolicy,
    /// Loaded clients, in assignment order
    pub successful: Vec<Client>,
    /// Clients that fit nowhere, in sort order
    pub failed: Vec<Client>,
    /// Vehicles carrying any cargo after the run
    pub vehicles_used: usize,
    /// Sum of all client weights, loaded or not
    pub total_cargo: f64,
    /// Sum of loaded client weights
    pub cargo_distributed: f64,
    /// Per-vehicle load after the run, in fleet order
    pub assignments: Vec<VehicleAssignment>,
}

impl DistributionResult {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Clients carried by one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleAssignment {
    pub vehicle_id: VehicleId,
    pub kind: VehicleKind,
    pub capacity: f64,
    pub current_load: f64,
    pub clients: Vec<Client>,
}

impl VehicleAssignment {
    pub fn of(vehicle: &Vehicle, clients: &[Client]) -> Self {
        Self {
            vehicle_id: vehicle.id().clone(),
            kind: vehicle.kind(),
            capacity: vehicle.capacity(),
            current_load: vehicle.current_load(),
            clients: vehicle
                .assigned_clients()
                .iter()
                .filter_map(|id| clients.get(id.index()).cloned())
                .collect(),
        }
    }

    /// Loaded percentage of capacity
    pub fn load_percentage(&self) -> f64 {
        self.current_load / self.capacity * 100.0
    }
}

/// Distribute `clients` over `vehicles`, replacing any previous loads
pub fn distribute(
    clients: &[Client],
    vehicles: &mut [Vehicle],
    policy: AssignmentPolicy,
) -> DistributionResult {
    for vehicle in vehicles.iter_mut() {
        vehicle.unload();
    }

    let total_cargo: f64 = clients.iter().map(Client::cargo_weight).sum();
    let client_order = client_order(clients);
    let vehicle_order = vehicle_order(vehicles);

    let mut successful = Vec::new();
    let mut failed = Vec::new();

    for id in client_order {
        let client = &clients[id.index()];
        let placed = match policy {
            AssignmentPolicy::FirstFitDescending => {
                place_first_fit(vehicles, &vehicle_order, id, client)
            }
            AssignmentPolicy::BestFitDescending => {
                place_best_fit(vehicles, &vehicle_order, id, client)
            }
        };

        match placed {
            Some(slot) => {
                debug!(
                    client = client.name(),
                    weight = client.cargo_weight(),
                    vehicle = %vehicles[slot].id(),
                    free_after = vehicles[slot].free_capacity(),
                    "cargo loaded"
                );
                successful.push(client.clone());
            }
            None => {
                debug!(
                    client = client.name(),
                    weight = client.cargo_weight(),
                    "no vehicle with enough free capacity"
                );
                failed.push(client.clone());
            }
        }
    }

    let cargo_distributed: f64 = successful.iter().map(Client::cargo_weight).sum();
    let vehicles_used = vehicles.iter().filter(|v| v.current_load() > 0.0).count();
    let assignments = vehicles
        .iter()
        .map(|v| VehicleAssignment::of(v, clients))
        .collect();

    info!(
        %policy,
        loaded = successful.len(),
        failed = failed.len(),
        vehicles_used,
        total_cargo,
        cargo_distributed,
        "distribution finished"
    );

    DistributionResult {
        policy,
        successful,
        failed,
        vehicles_used,
        total_cargo,
        cargo_distributed,
        assignments,
    }
}

/// Client handles in placement order: VIP first, then heaviest first
pub fn client_order(clients: &[Client]) -> Vec<ClientId> {
    let mut order: Vec<ClientId> = (0..clients.len()).map(ClientId::new).collect();
    order.sort_by(|a, b| {
        let (a, b) = (&clients[a.index()], &clients[b.index()]);
        b.is_vip()
            .cmp(&a.is_vip())
            .then_with(|| b.cargo_weight().total_cmp(&a.cargo_weight()))
    });
    order
}

/// Fleet positions by capacity, largest first
pub fn vehicle_order(vehicles: &[Vehicle]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..vehicles.len()).collect();
    order.sort_by(|&a, &b| vehicles[b].capacity().total_cmp(&vehicles[a].capacity()));
    order
}

/// A vehicle is only offered cargo that its free capacity covers
fn has_room(vehicle: &Vehicle, client: &Client) -> bool {
    vehicle.free_capacity() >= client.cargo_weight()
}

fn place_first_fit(
    vehicles: &mut [Vehicle],
    order: &[usize],
    id: ClientId,
    client: &Client,
) -> Option<usize> {
    for &slot in order {
        if has_room(&vehicles[slot], client) && vehicles[slot].load(id, client) {
            return Some(slot);
        }
    }
    None
}

fn place_best_fit(
    vehicles: &mut [Vehicle],
    order: &[usize],
    id: ClientId,
    client: &Client,
) -> Option<usize> {
    // Tightest partially-filled vehicle; earlier in order wins ties
    let mut best: Option<usize> = None;
    for &slot in order {
        let vehicle = &vehicles[slot];
        if vehicle.ledger().is_empty() || !has_room(vehicle, client) {
            continue;
        }
        match best {
            Some(b) if vehicles[b].free_capacity() <= vehicle.free_capacity() => {}
            _ => best = Some(slot),
        }
    }
    if let Some(slot) = best {
        if vehicles[slot].load(id, client) {
            return Some(slot);
        }
    }

    for &slot in order {
        let vehicle = &mut vehicles[slot];
        if vehicle.ledger().is_empty() && has_room(vehicle, client) && vehicle.load(id, client) {
            return Some(slot);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn van(id: &str, capacity: f64) -> Vehicle {
        Vehicle::van(VehicleId::new(id).unwrap(), capacity, false).unwrap()
    }

    fn client(name: &str, weight: f64, vip: bool) -> Client {
        Client::new(name, weight, vip).unwrap()
    }

    fn names(clients: &[Client]) -> Vec<&str> {
        clients.iter().map(Client::name).collect()
    }

    fn assert_ledgers_consistent(clients: &[Client], vehicles: &[Vehicle]) {
        let mut seen = std::collections::HashSet::new();
        for vehicle in vehicles {
            let sum: f64 = vehicle
                .assigned_clients()
                .iter()
                .map(|id| clients[id.index()].cargo_weight())
                .sum();
            assert!((vehicle.current_load() - sum).abs() < 1e-9);
            assert!(vehicle.current_load() <= vehicle.capacity());
            for id in vehicle.assigned_clients() {
                assert!(seen.insert(*id), "client {} loaded twice", id);
            }
        }
    }

    #[test]
    fn test_vip_first_then_failure() {
        let clients = vec![client("X", 7.0, false), client("Y", 4.0, true)];
        let mut vehicles = vec![van("V1", 10.0), van("V2", 6.0)];

        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);

        assert_eq!(names(&result.successful), vec!["Y"]);
        assert_eq!(names(&result.failed), vec!["X"]);
        assert!((result.cargo_distributed - 4.0).abs() < 0.01);
        assert!((result.total_cargo - 11.0).abs() < 0.01);
        assert_eq!(result.vehicles_used, 1);
        assert!((vehicles[0].current_load() - 4.0).abs() < 0.01);
        assert!(vehicles[1].current_load().abs() < f64::EPSILON);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_client_order_is_stable() {
        let clients = vec![
            client("A", 5.0, true),
            client("B", 5.0, true),
            client("C", 9.0, false),
        ];
        let order: Vec<usize> = client_order(&clients).into_iter().map(ClientId::index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_client_order_heaviest_first_within_tier() {
        let clients = vec![
            client("light", 1.0, false),
            client("vip-light", 2.0, true),
            client("heavy", 9.0, false),
            client("vip-heavy", 3.0, true),
        ];
        let order: Vec<&str> = client_order(&clients)
            .into_iter()
            .map(|id| clients[id.index()].name())
            .collect();
        assert_eq!(order, vec!["vip-heavy", "vip-light", "heavy", "light"]);
    }

    #[test]
    fn test_vehicle_order_keeps_insertion_on_ties() {
        let vehicles = vec![van("small", 5.0), van("big-1", 20.0), van("big-2", 20.0)];
        assert_eq!(vehicle_order(&vehicles), vec![1, 2, 0]);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let clients = vec![
            client("A", 15.0, true),
            client("B", 8.0, false),
            client("C", 12.0, true),
            client("D", 25.0, false),
        ];
        let mut vehicles = vec![van("V1", 30.0), van("V2", 10.0), van("V3", 8.0)];

        let first = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);
        let second = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);

        assert_eq!(first, second);
        assert_ledgers_consistent(&clients, &vehicles);
    }

    #[test]
    fn test_first_fit_prefers_largest_vehicle() {
        let clients = vec![client("A", 3.0, false), client("B", 2.0, false)];
        let mut vehicles = vec![van("small", 5.0), van("large", 10.0)];

        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);

        assert!(result.is_complete());
        assert_eq!(vehicles[1].assigned_clients(), &[ClientId::new(0), ClientId::new(1)]);
        assert!(vehicles[0].assigned_clients().is_empty());
        assert_eq!(result.vehicles_used, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let mut vehicles = vec![van("V1", 10.0)];
        let result = distribute(&[], &mut vehicles, AssignmentPolicy::FirstFitDescending);
        assert!(result.successful.is_empty());
        assert!(result.failed.is_empty());
        assert_eq!(result.vehicles_used, 0);
        assert!(result.total_cargo.abs() < f64::EPSILON);

        let clients = vec![client("A", 1.0, false)];
        let result = distribute(&clients, &mut [], AssignmentPolicy::FirstFitDescending);
        assert_eq!(names(&result.failed), vec!["A"]);
        assert!(result.assignments.is_empty());
    }

    #[test]
    fn test_previous_loads_are_discarded() {
        let clients = vec![client("A", 4.0, false)];
        let mut vehicles = vec![van("V1", 5.0)];
        let other = client("stale", 5.0, false);
        assert!(vehicles[0].load(ClientId::new(7), &other));

        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);

        assert!(result.is_complete());
        assert_eq!(vehicles[0].assigned_clients(), &[ClientId::new(0)]);
    }

    #[test]
    fn test_exact_fit_is_accepted() {
        let clients = vec![client("A", 6.0, false), client("B", 4.0, false)];
        let mut vehicles = vec![van("V1", 10.0)];
        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);
        assert!(result.is_complete());
        assert!(vehicles[0].free_capacity().abs() < f64::EPSILON);
    }

    fn diverging_case() -> (Vec<Client>, Vec<Vehicle>) {
        let clients = vec![
            client("A", 7.0, true),
            client("B", 6.0, true),
            client("C", 2.0, true),
            client("D", 3.0, false),
        ];
        let vehicles = vec![van("V1", 10.0), van("V2", 8.0)];
        (clients, vehicles)
    }

    #[test]
    fn test_first_fit_on_diverging_case() {
        let (clients, mut vehicles) = diverging_case();
        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);

        assert_eq!(names(&result.successful), vec!["A", "B", "C"]);
        assert_eq!(names(&result.failed), vec!["D"]);
        assert!(vehicles[0].carries(ClientId::new(2)));
        assert!((result.cargo_distributed - 15.0).abs() < 0.01);
        assert_ledgers_consistent(&clients, &vehicles);
    }

    #[test]
    fn test_best_fit_on_diverging_case() {
        let (clients, mut vehicles) = diverging_case();
        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::BestFitDescending);

        assert_eq!(names(&result.successful), vec!["A", "B", "C", "D"]);
        assert!(result.failed.is_empty());
        assert!(vehicles[1].carries(ClientId::new(2)));
        assert!(vehicles[0].carries(ClientId::new(3)));
        assert!((result.cargo_distributed - 18.0).abs() < 0.01);
        assert_eq!(result.policy, AssignmentPolicy::BestFitDescending);
        assert_ledgers_consistent(&clients, &vehicles);
    }

    #[test]
    fn test_free_capacity_gates_placement() {
        // 2.53 - 2.23 leaves slightly less than 0.3 free
        let clients = vec![client("A", 2.23, false), client("B", 0.3, false)];
        for policy in [
            AssignmentPolicy::FirstFitDescending,
            AssignmentPolicy::BestFitDescending,
        ] {
            let mut vehicles = vec![van("V1", 2.53)];
            let result = distribute(&clients, &mut vehicles, policy);

            assert!(vehicles[0].free_capacity() < 0.3);
            assert_eq!(names(&result.successful), vec!["A"]);
            assert_eq!(names(&result.failed), vec!["B"]);
            assert_ledgers_consistent(&clients, &vehicles);
        }
    }

    #[test]
    fn test_best_fit_tie_goes_to_first_in_vehicle_order() {
        let clients = vec![
            client("A", 7.0, true),
            client("B", 5.0, true),
            client("C", 2.0, false),
        ];
        // Vehicle order is [big, small]; both end up with 4t free before C
        let mut vehicles = vec![van("small", 9.0), van("big", 11.0)];
        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::BestFitDescending);

        assert!(result.is_complete());
        assert!(vehicles[1].carries(ClientId::new(0)));
        assert!(vehicles[0].carries(ClientId::new(1)));
        assert!(vehicles[1].carries(ClientId::new(2)));
        assert!(!vehicles[0].carries(ClientId::new(2)));
    }

    #[test]
    fn test_assignments_follow_fleet_order() {
        let clients = vec![client("A", 3.0, false), client("B", 9.0, false)];
        let mut vehicles = vec![van("small", 4.0), van("large", 10.0)];
        let result = distribute(&clients, &mut vehicles, AssignmentPolicy::FirstFitDescending);

        assert_eq!(result.assignments.len(), 2);
        assert_eq!(result.assignments[0].vehicle_id.as_str(), "small");
        assert_eq!(names(&result.assignments[0].clients), vec!["A"]);
        assert_eq!(names(&result.assignments[1].clients), vec!["B"]);
        assert!((result.assignments[1].load_percentage() - 90.0).abs() < 0.01);
    }
}
