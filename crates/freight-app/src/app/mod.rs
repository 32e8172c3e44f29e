//! Application use cases

pub mod dispatch_service;

pub use dispatch_service::{DispatchReport, DispatchService};
