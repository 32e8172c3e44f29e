//! Application service layer - use cases, config, export, demo data

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod repository;
