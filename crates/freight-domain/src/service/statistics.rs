//! Fleet utilization statistics

use serde::Serialize;

use crate::model::{CargoCarrier, Client, Vehicle};

/// Read-only summary of a company's current state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub company_name: String,
    pub total_vehicles: usize,
    pub total_capacity: f64,
    pub used_capacity: f64,
    /// `used_capacity / total_capacity * 100`, or 0 for an empty fleet
    pub utilization_percentage: f64,
    pub total_clients: usize,
    pub vip_clients: usize,
    pub regular_clients: usize,
}

pub fn compute_statistics(
    company_name: &str,
    clients: &[Client],
    vehicles: &[Vehicle],
) -> StatisticsSnapshot {
    let total_capacity: f64 = vehicles.iter().map(|v| v.capacity()).sum();
    let used_capacity: f64 = vehicles.iter().map(|v| v.current_load()).sum();
    let utilization_percentage = if total_capacity > 0.0 {
        used_capacity / total_capacity * 100.0
    } else {
        0.0
    };
    let vip_clients = clients.iter().filter(|c| c.is_vip()).count();

    StatisticsSnapshot {
        company_name: company_name.to_string(),
        total_vehicles: vehicles.len(),
        total_capacity,
        used_capacity,
        utilization_percentage,
        total_clients: clients.len(),
        vip_clients,
        regular_clients: clients.len() - vip_clients,
    }
}
