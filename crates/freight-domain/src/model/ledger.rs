//! Per-vehicle capacity accounting

use freight_types::ValidationError;

use super::client::{is_positive, ClientId};

/// Load state shared by every vehicle kind
///
/// `current_load` always equals the sum of the weights accepted since the
/// last `unload`, and never exceeds `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityLedger {
    capacity: f64,
    current_load: f64,
    assigned: Vec<ClientId>,
}

impl CapacityLedger {
    pub fn new(capacity: f64) -> Result<Self, ValidationError> {
        if !is_positive(capacity) {
            return Err(ValidationError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            current_load: 0.0,
            assigned: Vec::new(),
        })
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn current_load(&self) -> f64 {
        self.current_load
    }

    pub fn assigned_clients(&self) -> &[ClientId] {
        &self.assigned
    }

    pub fn free_capacity(&self) -> f64 {
        self.capacity - self.current_load
    }

    /// True when nothing has been loaded since the last reset
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Loaded fraction of capacity (0.0 - 1.0)
    pub fn load_ratio(&self) -> f64 {
        self.current_load / self.capacity
    }

    /// Whether `weight` more tonnes would still respect the capacity
    pub fn fits(&self, weight: f64) -> bool {
        self.current_load + weight <= self.capacity
    }

    /// Accept a shipment, or reject it without touching any state
    pub fn load(&mut self, client: ClientId, weight: f64) -> bool {
        if !self.fits(weight) {
            return false;
        }
        self.current_load += weight;
        self.assigned.push(client);
        true
    }

    pub fn unload(&mut self) {
        self.current_load = 0.0;
        self.assigned.clear();
    }
}
