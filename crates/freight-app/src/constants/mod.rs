//! Constants and reference data

pub mod demo;

pub use demo::{demo_company, DEMO_CLIENTS, DEMO_FLEET};
