//! CSV loader for client lists
//!
//! Expected columns (header optional):
//! name, cargo_weight, [is_vip]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use freight_domain::model::Client;
use freight_domain::repository::ClientSource;
use freight_types::{Error, Result};

/// Client list stored in a CSV file
pub struct CsvClientSource {
    path: PathBuf,
}

impl CsvClientSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClientSource for CsvClientSource {
    fn read_clients(&self) -> Result<Vec<Client>> {
        let file = File::open(&self.path)?;
        parse_clients(file)
    }
}

/// Parse clients from CSV data
///
/// The first record is taken as the header only when its weight column
/// carries a column name; any other unparsable weight is an error.
/// Reported rows are file line numbers.
pub fn parse_clients<R: Read>(reader: R) -> Result<Vec<Client>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut clients = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let name = record.get(0).unwrap_or_default();
        let weight_field = record.get(1).unwrap_or_default();
        let cargo_weight: f64 = match weight_field.parse() {
            Ok(w) => w,
            Err(_) if i == 0 && is_weight_header(weight_field) => {
                debug!(header = ?record, "skipping CSV header");
                continue;
            }
            Err(_) => {
                return Err(Error::CsvRow {
                    row,
                    message: format!("invalid cargo weight '{}'", weight_field),
                })
            }
        };
        let is_vip = match record.get(2) {
            Some(field) => parse_flag(field).ok_or_else(|| Error::CsvRow {
                row,
                message: format!("invalid VIP flag '{}'", field),
            })?,
            None => false,
        };

        let client = Client::new(name, cargo_weight, is_vip).map_err(|e| Error::CsvRow {
            row,
            message: e.to_string(),
        })?;
        clients.push(client);
    }
    Ok(clients)
}

fn is_weight_header(field: &str) -> bool {
    matches!(
        field.to_lowercase().as_str(),
        "cargo_weight" | "cargo weight" | "weight" | "cargo"
    )
}

fn parse_flag(field: &str) -> Option<bool> {
    match field.to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" | "regular" => Some(false),
        "true" | "yes" | "y" | "1" | "vip" => Some(true),
        _ => None,
    }
}
