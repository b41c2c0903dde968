#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line tool for the theft map.
//!
//! Reads and writes the same flat-file record store as the server, so
//! statistics can be inspected and reports added without starting it.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use theft_map_incident_models::{
    IncidentCategory, InvalidDateError, Location, NewIncident, parse_occurred_on,
};
use theft_map_server::ServerConfig;
use theft_map_stats::collect_stats;
use theft_map_store::json_file::JsonFileStore;
use theft_map_store::{RecordFilter, RecordSource as _, RecordStore as _};

#[derive(Parser)]
#[command(name = "theft_map_cli", about = "Theft map statistics and intake tool")]
struct Cli {
    /// Directory holding `denuncias.json`
    #[arg(long, env = "DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print category counts, hot zones, and monthly trend as JSON
    Stats {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print stored reports as JSON
    List {
        /// Only reports of this category (e.g. "hurto")
        #[arg(long)]
        category: Option<String>,
        /// Earliest occurrence date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// Latest occurrence date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
    },
    /// Add a report
    Add {
        /// Incident category (asalto, robo_vehiculo, robo_celular,
        /// robo_bicicleta, hurto, otro)
        #[arg(long)]
        category: IncidentCategory,
        /// Occurrence date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Street address
        #[arg(long)]
        address: Option<String>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1")]
        bind_addr: String,
        /// Port to bind
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,
        /// Frontend bundle directory
        #[arg(long, env = "STATIC_DIR", default_value = "app/dist")]
        static_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(&cli.data_dir);

    match cli.command {
        Commands::Stats { pretty } => {
            let snapshot = collect_stats(&store).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{json}");
        }
        Commands::List { category, from, to } => {
            let filter = list_filter(category, from.as_deref(), to.as_deref())?;
            let records = filter.apply(store.list_all().await?);
            log::info!("Listing {} records", records.len());
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Add {
            category,
            date,
            lat,
            lng,
            address,
            description,
        } => {
            let record = new_incident(category, date, lat, lng, address, description)
                .into_record(Utc::now())?;

            let id = record.id.clone();
            store.append(record).await?;
            log::info!("Added report {id} to {}", store.path().display());
            println!("{id}");
        }
        Commands::Serve {
            bind_addr,
            port,
            static_dir,
        } => {
            let config = ServerConfig {
                bind_addr,
                port,
                data_dir: cli.data_dir,
                static_dir,
            };
            log::info!(
                "Serving {} on {}:{}",
                config.data_dir.display(),
                config.bind_addr,
                config.port
            );
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(theft_map_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}

/// Builds the listing filter from the `list` flags.
fn list_filter(
    category: Option<String>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<RecordFilter, InvalidDateError> {
    Ok(RecordFilter {
        category,
        from: from.map(parse_occurred_on).transpose()?,
        to: to.map(parse_occurred_on).transpose()?,
    })
}

/// Builds an intake submission from the `add` flags.
fn new_incident(
    category: IncidentCategory,
    date: String,
    lat: f64,
    lng: f64,
    address: Option<String>,
    description: Option<String>,
) -> NewIncident {
    NewIncident {
        category,
        occurred_at: date,
        time: None,
        location: Location {
            lat,
            lng,
            address,
            zone: None,
        },
        brand: None,
        model: None,
        modality: None,
        description,
        contact: None,
    }
}
