//! Infrastructure layer - persistence implementations, loaders

pub mod client_csv;
pub mod persistence;
