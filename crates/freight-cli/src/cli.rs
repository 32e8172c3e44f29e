//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use freight_app::export::ExportFormat;
use freight_types::{AssignmentPolicy, OutputFormat};

#[derive(Parser)]
#[command(name = "freight-dispatch")]
#[command(version)]
#[command(about = "Distribute client cargo across a fleet of airplanes and vans")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Company data file. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VehicleType {
    Airplane,
    Van,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty company
    Init {
        /// Company name. Uses config value if not specified.
        name: Option<String>,

        /// Overwrite existing company data
        #[arg(long)]
        force: bool,
    },

    /// Add a client
    AddClient {
        name: String,

        /// Cargo weight in tonnes
        weight: f64,

        #[arg(long)]
        vip: bool,
    },

    /// Change a client (1-based index as shown by `clients`)
    EditClient {
        index: usize,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        vip: Option<bool>,
    },

    /// Remove a client (1-based index)
    RemoveClient { index: usize },

    /// Register a vehicle
    AddVehicle {
        #[arg(value_enum)]
        kind: VehicleType,

        /// Capacity in tonnes
        #[arg(long, short = 'c')]
        capacity: f64,

        /// Maximum altitude in metres (airplanes)
        #[arg(long, required_if_eq("kind", "airplane"))]
        max_altitude: Option<f64>,

        /// Refrigerated van
        #[arg(long)]
        refrigerated: bool,
    },

    /// Remove a vehicle by id
    RemoveVehicle { id: String },

    /// List clients
    Clients,

    /// List vehicles with their current load
    Vehicles,

    /// Distribute all clients across the fleet
    Distribute {
        /// Placement policy. Uses config value if not specified.
        #[arg(long, short = 'p')]
        policy: Option<AssignmentPolicy>,
    },

    /// Show fleet statistics
    Stats,

    /// Show which vehicle carries a client (1-based index)
    Locate { index: usize },

    /// Export the current assignment
    Export {
        /// Output file
        path: PathBuf,

        /// File format. Inferred from the extension if not specified.
        #[arg(long = "as")]
        format: Option<ExportFormat>,
    },

    /// Append clients from a CSV file (name, cargo_weight, [is_vip])
    ImportClients { csv: PathBuf },

    /// Replace company data with the demo fleet and clients
    Demo {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Remove all clients and vehicles
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set company data file
        #[arg(long)]
        set_data_file: Option<PathBuf>,

        /// Set default distribution policy
        #[arg(long)]
        set_policy: Option<AssignmentPolicy>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default company name
        #[arg(long)]
        set_company_name: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
