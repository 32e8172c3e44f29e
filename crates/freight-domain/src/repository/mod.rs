//! Repository trait definitions for data persistence

use freight_types::Error;

use crate::model::{Client, TransportCompany};

/// Storage for a single company's state
pub trait CompanyRepository {
    /// Load the stored company, `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<TransportCompany>, Error>;

    /// Persist the company, replacing the previous state
    fn save(&self, company: &TransportCompany) -> Result<(), Error>;

    /// Where the state lives, for messages
    fn location(&self) -> String;
}

/// Bulk source of clients (CSV files and the like)
pub trait ClientSource {
    fn read_clients(&self) -> Result<Vec<Client>, Error>;
}
