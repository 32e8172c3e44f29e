//! Client (shipper) definitions

use serde::{Deserialize, Serialize};

use freight_types::ValidationError;

/// Position of a client in the company's client list
///
/// Vehicles refer to clients through this handle instead of owning a copy.
/// Handles are positional, so removing or replacing a client invalidates
/// every outstanding assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(usize);

impl ClientId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// A customer with a single shipment to transport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    name: String,
    /// Shipment weight in tonnes
    cargo_weight: f64,
    is_vip: bool,
}

impl Client {
    /// Create a validated client
    ///
    /// The name must contain at least one non-whitespace character and the
    /// weight must be a finite number greater than zero.
    pub fn new(
        name: impl Into<String>,
        cargo_weight: f64,
        is_vip: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyClientName);
        }
        if !is_positive(cargo_weight) {
            return Err(ValidationError::InvalidCargoWeight(cargo_weight));
        }
        Ok(Self {
            name,
            cargo_weight,
            is_vip,
        })
    }

    /// Create a regular (non-VIP) client
    pub fn regular(name: impl Into<String>, cargo_weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, cargo_weight, false)
    }

    /// Create a VIP client
    pub fn vip(name: impl Into<String>, cargo_weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, cargo_weight, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cargo_weight(&self) -> f64 {
        self.cargo_weight
    }

    pub fn is_vip(&self) -> bool {
        self.is_vip
    }

    /// Status label used in listings
    pub fn status_label(&self) -> &'static str {
        if self.is_vip {
            "VIP"
        } else {
            "regular"
        }
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Client: {}, cargo: {}t, status: {}",
            self.name,
            self.cargo_weight,
            self.status_label()
        )
    }
}

/// Finite and strictly greater than zero
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
