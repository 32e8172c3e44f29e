//! Dispatch Service - company use cases over a repository
//!
//! Every mutating use case follows the same cycle:
//! 1. Load the stored company
//! 2. Apply the change through the domain aggregate
//! 3. Save the company back
//!
//! Validation errors from the domain propagate unchanged.

use serde::Serialize;
use tracing::info;

use freight_domain::model::TransportCompany;
use freight_domain::repository::{ClientSource, CompanyRepository};
use freight_domain::service::{DistributionResult, StatisticsSnapshot};
use freight_types::{AssignmentPolicy, Error, Result};

use crate::constants::demo_company;

/// Distribution outcome together with the resulting fleet statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchReport {
    pub result: DistributionResult,
    pub statistics: StatisticsSnapshot,
}

pub struct DispatchService<R: CompanyRepository> {
    repo: R,
}

impl<R: CompanyRepository> DispatchService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Create and store an empty company
    ///
    /// Refuses to overwrite existing data unless `force` is set.
    pub fn init(&self, name: &str, force: bool) -> Result<TransportCompany> {
        if !force && self.repo.load()?.is_some() {
            return Err(Error::CompanyExists(self.repo.location()));
        }
        let company = TransportCompany::new(name)?;
        self.repo.save(&company)?;
        info!(company = name, "company initialized");
        Ok(company)
    }

    /// Load the stored company, failing when none exists
    pub fn load(&self) -> Result<TransportCompany> {
        self.repo
            .load()?
            .ok_or_else(|| Error::CompanyNotFound(self.repo.location()))
    }

    /// Load, mutate and save in one step
    ///
    /// Nothing is saved when `change` fails.
    pub fn update<T>(&self, change: impl FnOnce(&mut TransportCompany) -> Result<T>) -> Result<T> {
        let mut company = self.load()?;
        let value = change(&mut company)?;
        self.repo.save(&company)?;
        Ok(value)
    }

    /// Run a distribution and persist the resulting loads
    pub fn distribute(&self, policy: AssignmentPolicy) -> Result<DispatchReport> {
        self.update(|company| {
            let result = company.distribute_with(policy);
            let statistics = company.statistics();
            Ok(DispatchReport { result, statistics })
        })
    }

    /// Append every client from `source`; returns how many were added
    ///
    /// The source is read completely before anything is stored, so a bad row
    /// leaves the company untouched.
    pub fn import_clients(&self, source: &impl ClientSource) -> Result<usize> {
        let clients = source.read_clients()?;
        let count = clients.len();
        self.update(|company| {
            for client in clients {
                company.add_client(client);
            }
            Ok(())
        })?;
        info!(count, "clients imported");
        Ok(count)
    }

    /// Replace the stored company with the demo data set
    ///
    /// Keeps the current company name when one exists.
    pub fn load_demo(&self, fallback_name: &str) -> Result<TransportCompany> {
        let name = match self.repo.load()? {
            Some(existing) => existing.name().to_string(),
            None => fallback_name.to_string(),
        };
        let company = demo_company(&name)?;
        self.repo.save(&company)?;
        info!(company = %name, "demo data loaded");
        Ok(company)
    }
}
