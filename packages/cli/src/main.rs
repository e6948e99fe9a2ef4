#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front end for the `SecureCheck` traffic-stop dashboard.
//!
//! ```text
//! securecheck table
//! securecheck reports [--tier complex]
//! securecheck report --tier advanced "Time of day sees the most traffic stops"
//! securecheck charts
//! securecheck predict --gender male --age 30 --country India --race Asian \
//!     --vehicle MH12CD5678 [--search] [--drugs] [--duration "0-15 Min"]
//! securecheck serve
//! ```
//!
//! Running `securecheck` with no subcommand enters interactive mode.

mod commands;
mod interactive;

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use securecheck_analytics::Dashboard;
use securecheck_analytics_models::ReportTier;
use securecheck_database::{DataAccess, DatabaseConfig};
use securecheck_stop_models::{Gender, NewStopLog};

#[derive(Parser)]
#[command(name = "securecheck", about = "Explore police traffic-stop records")]
struct Cli {
    /// TOML file with database settings; environment variables still apply
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every stop
    Table,
    /// List the reports of one menu
    Reports {
        /// Menu to list (advanced or complex)
        #[arg(long, default_value = "advanced")]
        tier: ReportTier,
    },
    /// Run one report by name
    Report {
        /// Menu the report belongs to (advanced or complex)
        #[arg(long)]
        tier: ReportTier,
        /// Report name as listed by `reports`
        name: String,
    },
    /// Print the violation, gender and drug-stop distributions
    Charts,
    /// Predict the violation and outcome of a new stop
    Predict {
        #[arg(long)]
        gender: Gender,
        #[arg(long)]
        age: i64,
        #[arg(long)]
        country: String,
        #[arg(long)]
        race: String,
        #[arg(long)]
        vehicle: String,
        /// A search was conducted
        #[arg(long)]
        search: bool,
        /// Kind of search, if any
        #[arg(long, default_value = "")]
        search_type: String,
        /// The stop was drug related
        #[arg(long)]
        drugs: bool,
        /// Stop duration; defaults to the first duration in the data
        #[arg(long)]
        duration: Option<String>,
        /// Stop date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Stop time (HH:MM:SS); defaults to now
        #[arg(long)]
        time: Option<NaiveTime>,
    },
    /// Serve the JSON API on `BIND_ADDR:PORT`
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = DatabaseConfig::load(cli.config.as_deref())?;
    log::debug!("Database: {}", config.describe());

    let Some(command) = cli.command else {
        return interactive::run(config).await;
    };

    let dashboard = Dashboard::new(DataAccess::from_config(config.clone()));

    match command {
        Commands::Table => commands::show_table(&dashboard).await,
        Commands::Reports { tier } => commands::list_reports(tier),
        Commands::Report { tier, name } => {
            commands::show_report(&dashboard, tier, &name).await?;
        }
        Commands::Charts => commands::show_charts(&dashboard).await,
        Commands::Predict {
            gender,
            age,
            country,
            race,
            vehicle,
            search,
            search_type,
            drugs,
            duration,
            date,
            time,
        } => {
            let now = Local::now().naive_local();
            let input = NewStopLog {
                stop_date: date.unwrap_or_else(|| now.date()),
                stop_time: time.unwrap_or_else(|| now.time()),
                country_name: country,
                driver_gender: gender,
                driver_age: age,
                driver_race: race,
                search_conducted: search,
                search_type,
                drugs_stop: drugs,
                stop_duration: duration.unwrap_or_default(),
                vehicle_number: vehicle,
            };
            commands::show_prediction(&dashboard, input).await?;
        }
        Commands::Serve => serve(config).await?,
    }

    Ok(())
}

/// Runs the API server on its own actix system.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
async fn serve(config: DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(securecheck_server::run_server(config))
    })
    .await??;
    Ok(())
}
