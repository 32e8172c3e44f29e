//! Output formatting module

use serde_json::json;

use freight_app::app::DispatchReport;
use freight_domain::model::{Client, ClientId, TransportCompany, VehicleId};
use freight_domain::service::{StatisticsSnapshot, VehicleAssignment};
use freight_types::{OutputFormat, Result};

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_clients(output_format: OutputFormat, company: &TransportCompany) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&company.clients());
    }

    println!("\nClients ({})", company.name());
    println!("==========");
    if company.clients().is_empty() {
        println!("No clients registered.");
        return Ok(());
    }
    println!("{:>4}  {:<28} {:>10}  {:<8} {}", "#", "Name", "Cargo", "Status", "Vehicle");
    println!("{}", "-".repeat(66));
    for (i, client) in company.clients().iter().enumerate() {
        let vehicle = company
            .vehicle_for_client(ClientId::new(i))
            .map(VehicleId::as_str)
            .unwrap_or("-");
        println!(
            "{:>4}  {:<28} {:>9.2}t  {:<8} {}",
            i + 1,
            truncate(client.name(), 28),
            client.cargo_weight(),
            client.status_label(),
            vehicle
        );
    }
    println!("\nTotal cargo: {:.2}t", company.total_cargo());
    Ok(())
}

pub fn output_vehicles(output_format: OutputFormat, company: &TransportCompany) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&company.assignments());
    }

    println!("\nVehicles ({})", company.name());
    println!("===========");
    let lines = company.list_vehicles();
    if lines.is_empty() {
        println!("No vehicles registered.");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub fn output_distribution(output_format: OutputFormat, report: &DispatchReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }

    let result = &report.result;
    println!("\nDistribution Result ({})", result.policy);
    println!("===================");
    println!(
        "Clients:     {} placed, {} not placed",
        result.successful.len(),
        result.failed.len()
    );
    println!(
        "Cargo:       {:.2}t of {:.2}t distributed",
        result.cargo_distributed, result.total_cargo
    );
    println!("Vehicles:    {} used", result.vehicles_used);

    if !result.successful.is_empty() {
        println!("\nPlaced:");
        for client in &result.successful {
            println!("  {}", client);
        }
    }
    if !result.failed.is_empty() {
        println!("\nNot placed (no vehicle with enough free capacity):");
        for client in &result.failed {
            println!("  {}", client);
        }
    }

    let loaded = loaded_by_weight(&result.assignments);
    if !loaded.is_empty() {
        println!("\nVehicle loads:");
        for assignment in loaded {
            println!(
                "  {} {:<8} {:>7.2}t / {:>7.2}t ({:>5.1}%) - {} client(s)",
                assignment.vehicle_id,
                assignment.kind.label(),
                assignment.current_load,
                assignment.capacity,
                assignment.load_percentage(),
                assignment.clients.len()
            );
        }
    }

    println!();
    print_statistics_table(&report.statistics);
    Ok(())
}

pub fn output_statistics(output_format: OutputFormat, stats: &StatisticsSnapshot) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(stats);
    }
    print_statistics_table(stats);
    Ok(())
}

pub fn output_location(
    output_format: OutputFormat,
    client: &Client,
    vehicle: Option<&VehicleId>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&json!({
            "client": client,
            "vehicle_id": vehicle,
        }));
    }

    match vehicle {
        Some(id) => println!("{} is loaded on vehicle {}", client, id),
        None => println!("{} is not assigned to any vehicle", client),
    }
    Ok(())
}

fn print_statistics_table(stats: &StatisticsSnapshot) {
    println!("Fleet Statistics - {}", stats.company_name);
    println!("================");
    println!("Vehicles:        {}", stats.total_vehicles);
    println!("Total capacity:  {:.2}t", stats.total_capacity);
    println!("Used capacity:   {:.2}t", stats.used_capacity);
    println!("Utilization:     {:.1}%", stats.utilization_percentage);
    println!(
        "Clients:         {} (VIP: {}, regular: {})",
        stats.total_clients, stats.vip_clients, stats.regular_clients
    );
}

/// Non-empty vehicles, heaviest load first
fn loaded_by_weight(assignments: &[VehicleAssignment]) -> Vec<&VehicleAssignment> {
    let mut loaded: Vec<_> = assignments.iter().filter(|a| !a.clients.is_empty()).collect();
    loaded.sort_by(|a, b| b.current_load.total_cmp(&a.current_load));
    loaded
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}~", cut)
    }
}
