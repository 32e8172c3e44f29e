//! Command handlers

use std::path::PathBuf;

use tracing::debug;

use freight_app::app::DispatchService;
use freight_app::config::Config;
use freight_app::export::{export_assignments, ExportFormat};
use freight_app::repository::{open_company_repo, open_company_repo_at};
use freight_domain::model::{Client, ClientId, VehicleId};
use freight_domain::repository::CompanyRepository;
use freight_infra::client_csv::CsvClientSource;
use freight_infra::persistence::FileCompanyRepository;
use freight_types::{AssignmentPolicy, Error, OutputFormat, Result};

use crate::cli::{Cli, Commands, VehicleType};
use crate::output;

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref data) = cli.data {
        config.data_file = Some(data.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    let repo = match cli.data {
        Some(path) => open_company_repo_at(path),
        None => open_company_repo(&config)?,
    };
    debug!(data = %repo.location(), "using company data");
    let service = DispatchService::new(repo);

    run(cli.command, &service, &config, output_format)
}

fn run(
    command: Commands,
    service: &DispatchService<FileCompanyRepository>,
    config: &Config,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Init { name, force } => {
            let name = name.unwrap_or_else(|| config.default_company_name.clone());
            let company = service.init(&name, force)?;
            println!("Company '{}' created at {}", company.name(), service.repository().location());
            Ok(())
        }

        Commands::AddClient { name, weight, vip } => {
            let client = Client::new(name, weight, vip)?;
            let summary = client.to_string();
            let id = service.update(|company| Ok(company.add_client(client)))?;
            println!("Added {} {}", id, summary);
            Ok(())
        }

        Commands::EditClient {
            index,
            name,
            weight,
            vip,
        } => cmd_edit_client(service, index, name, weight, vip),

        Commands::RemoveClient { index } => {
            let id = client_id(index)?;
            let removed = service.update(|company| company.remove_client(id))?;
            println!("Removed {}", removed);
            println!("Vehicles were unloaded; run `distribute` again.");
            Ok(())
        }

        Commands::AddVehicle {
            kind,
            capacity,
            max_altitude,
            refrigerated,
        } => {
            let id = service.update(|company| {
                let id = match kind {
                    VehicleType::Airplane => {
                        company.register_airplane(capacity, max_altitude.unwrap_or_default())?
                    }
                    VehicleType::Van => company.register_van(capacity, refrigerated)?,
                };
                Ok(id)
            })?;
            let company = service.load()?;
            if let Some(vehicle) = company.vehicle(&id) {
                println!("Added {}", vehicle);
            }
            Ok(())
        }

        Commands::RemoveVehicle { id } => {
            let id = VehicleId::new(id)?;
            let removed = service.update(|company| company.remove_vehicle(&id))?;
            println!("Removed {}", removed);
            Ok(())
        }

        Commands::Clients => {
            let company = service.load()?;
            output::output_clients(output_format, &company)
        }

        Commands::Vehicles => {
            let company = service.load()?;
            output::output_vehicles(output_format, &company)
        }

        Commands::Distribute { policy } => {
            let policy = policy.unwrap_or(config.policy);
            let report = service.distribute(policy)?;
            output::output_distribution(output_format, &report)
        }

        Commands::Stats => {
            let company = service.load()?;
            output::output_statistics(output_format, &company.statistics())
        }

        Commands::Locate { index } => {
            let id = client_id(index)?;
            let company = service.load()?;
            let client = company
                .client(id)
                .ok_or(Error::ClientNotFound(index))?;
            output::output_location(output_format, client, company.vehicle_for_client(id))
        }

        Commands::Export { path, format } => cmd_export(service, path, format),

        Commands::ImportClients { csv } => {
            let count = service.import_clients(&CsvClientSource::new(csv))?;
            println!("Imported {} client(s)", count);
            Ok(())
        }

        Commands::Demo { yes } => {
            if !yes && !confirm("Replace all company data with the demo fleet and clients?") {
                println!("Cancelled.");
                return Ok(());
            }
            let company = service.load_demo(&config.default_company_name)?;
            println!(
                "Demo data loaded: {} vehicle(s), {} client(s)",
                company.vehicles().len(),
                company.clients().len()
            );
            Ok(())
        }

        Commands::Clear { yes } => {
            if !yes && !confirm("Remove all clients and vehicles?") {
                println!("Cancelled.");
                return Ok(());
            }
            service.update(|company| {
                company.clear();
                Ok(())
            })?;
            println!("All clients and vehicles removed");
            Ok(())
        }

        Commands::Config {
            show,
            set_data_file,
            set_policy,
            set_output,
            set_company_name,
            reset,
        } => cmd_config(show, set_data_file, set_policy, set_output, set_company_name, reset),
    }
}

/// Convert a 1-based index from the command line
fn client_id(index: usize) -> Result<ClientId> {
    index
        .checked_sub(1)
        .map(ClientId::new)
        .ok_or(Error::ClientNotFound(index))
}

fn confirm(question: &str) -> bool {
    println!("{} [y/N]", question);
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).ok();
    input.trim().eq_ignore_ascii_case("y")
}

fn cmd_edit_client(
    service: &DispatchService<FileCompanyRepository>,
    index: usize,
    name: Option<String>,
    weight: Option<f64>,
    vip: Option<bool>,
) -> Result<()> {
    let id = client_id(index)?;
    let updated = service.update(|company| {
        let current = company.client(id).ok_or(Error::ClientNotFound(index))?;
        let client = Client::new(
            name.unwrap_or_else(|| current.name().to_string()),
            weight.unwrap_or(current.cargo_weight()),
            vip.unwrap_or(current.is_vip()),
        )?;
        company.replace_client(id, client.clone())?;
        Ok(client)
    })?;
    println!("Updated {}", updated);
    println!("Vehicles were unloaded; run `distribute` again.");
    Ok(())
}

fn cmd_export(
    service: &DispatchService<FileCompanyRepository>,
    path: PathBuf,
    format: Option<ExportFormat>,
) -> Result<()> {
    let company = service.load()?;
    let format = export_assignments(&company, &path, format)?;
    println!("Exported ({}) to: {}", format, path.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_data_file: Option<PathBuf>,
    set_policy: Option<AssignmentPolicy>,
    set_output: Option<OutputFormat>,
    set_company_name: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_data_file {
        config.data_file = Some(path);
        modified = true;
    }

    if let Some(policy) = set_policy {
        config.policy = policy;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(name) = set_company_name {
        config.default_company_name = name;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
