//! Repository adapters for persistence layer

use std::path::PathBuf;

use freight_infra::persistence::FileCompanyRepository;
use freight_types::Result;

use crate::config::Config;

/// Open the company repository configured for this user
pub fn open_company_repo(config: &Config) -> Result<FileCompanyRepository> {
    Ok(FileCompanyRepository::new(config.data_file()?))
}

/// Open a company repository at a custom path
pub fn open_company_repo_at(path: PathBuf) -> FileCompanyRepository {
    FileCompanyRepository::new(path)
}
