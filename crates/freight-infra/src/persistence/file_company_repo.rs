//! File-based implementation of CompanyRepository

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use freight_domain::model::{CompanySnapshot, TransportCompany};
use freight_domain::repository::CompanyRepository;
use freight_types::{Error, Result};

/// Company state stored as a pretty-printed JSON file
pub struct FileCompanyRepository {
    path: PathBuf,
}

impl FileCompanyRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the raw snapshot without rebuilding entities
    pub fn read_snapshot(&self) -> Result<Option<CompanySnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)?;
        Ok(Some(snapshot))
    }

    /// Load the company or fail with `CompanyNotFound`
    pub fn load_existing(&self) -> Result<TransportCompany> {
        self.load()?
            .ok_or_else(|| Error::CompanyNotFound(self.location()))
    }
}

impl CompanyRepository for FileCompanyRepository {
    fn load(&self) -> Result<Option<TransportCompany>> {
        let Some(snapshot) = self.read_snapshot()? else {
            return Ok(None);
        };
        let company = TransportCompany::restore(snapshot)?;
        info!(
            path = %self.path.display(),
            clients = company.clients().len(),
            vehicles = company.vehicles().len(),
            "company loaded"
        );
        Ok(Some(company))
    }

    fn save(&self, company: &TransportCompany) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut snapshot = company.snapshot();
        snapshot.saved_at = Some(Utc::now());

        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        info!(path = %self.path.display(), "company saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
