//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_company_repo;

pub use file_company_repo::FileCompanyRepository;
