//! Excel export functionality

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use freight_domain::model::TransportCompany;
use freight_domain::service::VehicleAssignment;
use freight_types::{ExportError, Result};

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> ExportError {
    ExportError::Excel(e.to_string())
}

/// Export the current assignment to an Excel workbook
pub fn export_to_excel(
    company: &TransportCompany,
    assignments: &[VehicleAssignment],
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, company)?;

    let assignment_sheet = workbook.add_worksheet();
    write_assignment_sheet(assignment_sheet, assignments)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, company: &TransportCompany) -> Result<()> {
    let stats = company.statistics();
    let header_format = Format::new().set_bold();

    sheet.set_name("Summary").map_err(xlsx_err)?;
    sheet
        .write_string_with_format(0, 0, "Cargo Distribution Report", &header_format)
        .map_err(xlsx_err)?;

    let rows: [(&str, f64); 7] = [
        ("Vehicles", stats.total_vehicles as f64),
        ("Total capacity (t)", stats.total_capacity),
        ("Loaded (t)", stats.used_capacity),
        ("Utilization (%)", stats.utilization_percentage),
        ("Clients", stats.total_clients as f64),
        ("VIP clients", stats.vip_clients as f64),
        ("Regular clients", stats.regular_clients as f64),
    ];

    sheet.write_string(2, 0, "Company:").map_err(xlsx_err)?;
    sheet.write_string(2, 1, &stats.company_name).map_err(xlsx_err)?;
    for (i, (label, value)) in rows.iter().enumerate() {
        let row = 3 + i as u32;
        sheet.write_string(row, 0, *label).map_err(xlsx_err)?;
        sheet.write_number(row, 1, *value).map_err(xlsx_err)?;
    }

    Ok(())
}

fn write_assignment_sheet(sheet: &mut Worksheet, assignments: &[VehicleAssignment]) -> Result<()> {
    let header_format = Format::new().set_bold();

    sheet.set_name("Assignments").map_err(xlsx_err)?;
    let headers = ["Vehicle ID", "Type", "Client", "Cargo (t)", "VIP"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    let mut row = 1u32;
    for assignment in assignments {
        for client in &assignment.clients {
            sheet
                .write_string(row, 0, assignment.vehicle_id.as_str())
                .map_err(xlsx_err)?;
            sheet
                .write_string(row, 1, assignment.kind.label())
                .map_err(xlsx_err)?;
            sheet.write_string(row, 2, client.name()).map_err(xlsx_err)?;
            sheet
                .write_number(row, 3, client.cargo_weight())
                .map_err(xlsx_err)?;
            sheet
                .write_boolean(row, 4, client.is_vip())
                .map_err(xlsx_err)?;
            row += 1;
        }
    }

    Ok(())
}
