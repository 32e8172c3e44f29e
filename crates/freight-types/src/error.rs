//! Error types for freight-dispatch

use thiserror::Error;

/// Entity construction errors
///
/// Raised when a client, vehicle or company would violate one of its
/// invariants. Never corrected silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Client name must be a non-empty string")]
    EmptyClientName,

    #[error("Company name must be a non-empty string")]
    EmptyCompanyName,

    #[error("Cargo weight must be a positive number, got {0}")]
    InvalidCargoWeight(f64),

    #[error("Vehicle capacity must be a positive number, got {0}")]
    InvalidCapacity(f64),

    #[error("Maximum altitude must be a positive number, got {0}")]
    InvalidAltitude(f64),

    #[error("Vehicle id must be a non-empty string")]
    EmptyVehicleId,

    #[error("Vehicle id already registered: {0}")]
    DuplicateVehicleId(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Export-related errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: run a distribution first")]
    NothingToExport,

    #[error("Cannot infer export format from path: {0}")]
    UnknownFormat(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid CSV row {row}: {message}")]
    CsvRow { row: usize, message: String },

    /// 1-based client number, as shown to users
    #[error("Client #{0} not found")]
    ClientNotFound(usize),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("No company data at {0}; run `init` first")]
    CompanyNotFound(String),

    #[error("Company data already exists at {0}; use --force to overwrite")]
    CompanyExists(String),
}

pub type Result<T> = std::result::Result<T, Error>;
