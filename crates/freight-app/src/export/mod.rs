//! Export of the current cargo assignment
//!
//! Formats: JSON (vehicle id -> clients), CSV (one row per loaded client),
//! plain text (per-vehicle list) and Excel (summary + assignments sheets).

mod excel;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use tracing::info;

use freight_domain::model::TransportCompany;
use freight_domain::service::VehicleAssignment;
use freight_types::{ExportError, Result};

pub use excel::export_to_excel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Txt,
    Xlsx,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(ExportError::UnknownFormat(path.display().to_string()).into()),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Txt => write!(f, "txt"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Write the company's current assignment to `path`
///
/// Fails with `NothingToExport` when no vehicle carries anything.
pub fn export_assignments(
    company: &TransportCompany,
    path: &Path,
    format: Option<ExportFormat>,
) -> Result<ExportFormat> {
    if !company.has_assignments() {
        return Err(ExportError::NothingToExport.into());
    }
    let format = match format {
        Some(f) => f,
        None => ExportFormat::from_path(path)?,
    };

    let assignments = company.assignments();
    match format {
        ExportFormat::Json => write_json(&assignments, path)?,
        ExportFormat::Csv => write_csv(&assignments, path)?,
        ExportFormat::Txt => write_txt(&assignments, path)?,
        ExportFormat::Xlsx => export_to_excel(company, &assignments, path)?,
    }

    info!(path = %path.display(), %format, "assignment exported");
    Ok(format)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Vehicle id -> clients object, keys in fleet order
struct ClientsByVehicle<'a>(&'a [VehicleAssignment]);

impl Serialize for ClientsByVehicle<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|a| (a.vehicle_id.as_str(), a.clients.as_slice())),
        )
    }
}

fn write_json(assignments: &[VehicleAssignment], path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &ClientsByVehicle(assignments))?;
    Ok(())
}

fn write_csv(assignments: &[VehicleAssignment], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["vehicle_id", "client_name", "cargo_weight", "vip"])?;
    for assignment in assignments {
        for client in &assignment.clients {
            let weight = client.cargo_weight().to_string();
            writer.write_record([
                assignment.vehicle_id.as_str(),
                client.name(),
                weight.as_str(),
                yes_no(client.is_vip()),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_txt(assignments: &[VehicleAssignment], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for assignment in assignments.iter().filter(|a| !a.clients.is_empty()) {
        writeln!(writer, "{}:", assignment.vehicle_id)?;
        for client in &assignment.clients {
            writeln!(
                writer,
                "  - {} - {}t (VIP: {})",
                client.name(),
                client.cargo_weight(),
                yes_no(client.is_vip())
            )?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
