//! Menu-driven mode for the `SecureCheck` CLI.
//!
//! Loops over a top-level menu until the user quits. Each pass fetches
//! fresh data, the same way each page view of the dashboard does.

use chrono::{Local, NaiveDate, NaiveTime, Timelike as _};
use dialoguer::{Confirm, Input, Select};
use securecheck_analytics::{Dashboard, report_names, stop_duration_options};
use securecheck_analytics_models::ReportTier;
use securecheck_database::{DataAccess, DatabaseConfig};
use securecheck_stop_models::{Gender, MAX_DRIVER_AGE, MIN_DRIVER_AGE, NewStopLog};

use crate::commands;

/// Top-level actions in the interactive menu.
enum Action {
    Table,
    AdvancedReport,
    ComplexReport,
    Charts,
    Predict,
    Serve,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Table,
        Self::AdvancedReport,
        Self::ComplexReport,
        Self::Charts,
        Self::Predict,
        Self::Serve,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Table => "View all stops",
            Self::AdvancedReport => "Run an advanced report",
            Self::ComplexReport => "Run a complex report",
            Self::Charts => "Show charts",
            Self::Predict => "Add a police log & predict the outcome",
            Self::Serve => "Start server",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if a prompt fails or the server fails to start.
pub async fn run(config: DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("SecureCheck: Police Check Post Digital Ledger");
    println!();

    let dashboard = Dashboard::new(DataAccess::from_config(config.clone()));
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::Table => commands::show_table(&dashboard).await,
            Action::AdvancedReport => handle_report(&dashboard, ReportTier::Advanced).await?,
            Action::ComplexReport => handle_report(&dashboard, ReportTier::Complex).await?,
            Action::Charts => commands::show_charts(&dashboard).await,
            Action::Predict => handle_predict(&dashboard).await?,
            Action::Serve => {
                // The server takes over the terminal until it stops.
                let config = config.clone();
                tokio::task::spawn_blocking(move || {
                    actix_web::rt::System::new()
                        .block_on(securecheck_server::interactive::run(config))
                })
                .await??;
                return Ok(());
            }
            Action::Quit => return Ok(()),
        }

        println!();
    }
}

/// Picks a report from `tier`'s menu and runs it.
async fn handle_report(
    dashboard: &Dashboard,
    tier: ReportTier,
) -> Result<(), Box<dyn std::error::Error>> {
    let names = report_names(tier);

    let idx = Select::new()
        .with_prompt(tier.heading())
        .items(&names)
        .default(0)
        .interact()?;

    commands::show_report(dashboard, tier, names[idx]).await?;
    Ok(())
}

/// Collects a new stop through prompts and prints the prediction.
///
/// Durations are offered from the current data; the entered stop is not
/// saved.
async fn handle_predict(dashboard: &Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    let now = Local::now().naive_local();

    let stop_date: NaiveDate = Input::new()
        .with_prompt("Stop date (YYYY-MM-DD)")
        .default(now.date())
        .interact_text()?;

    let stop_time: NaiveTime = Input::new()
        .with_prompt("Stop time (HH:MM:SS)")
        .default(now.time().with_nanosecond(0).unwrap_or_else(|| now.time()))
        .interact_text()?;

    let country_name: String = Input::new().with_prompt("Country name").interact_text()?;

    let genders = Gender::all();
    let gender_idx = Select::new()
        .with_prompt("Driver gender")
        .items(genders)
        .default(0)
        .interact()?;

    let driver_age: i64 = Input::new()
        .with_prompt(format!("Driver age ({MIN_DRIVER_AGE}-{MAX_DRIVER_AGE})"))
        .default(27)
        .validate_with(|age: &i64| {
            if (MIN_DRIVER_AGE..=MAX_DRIVER_AGE).contains(age) {
                Ok(())
            } else {
                Err(format!(
                    "Age must be between {MIN_DRIVER_AGE} and {MAX_DRIVER_AGE}"
                ))
            }
        })
        .interact_text()?;

    let driver_race: String = Input::new().with_prompt("Driver race").interact_text()?;

    let search_conducted = Confirm::new()
        .with_prompt("Was a search conducted?")
        .default(false)
        .interact()?;

    let search_type: String = if search_conducted {
        Input::new().with_prompt("Search type").interact_text()?
    } else {
        String::new()
    };

    let drugs_stop = Confirm::new()
        .with_prompt("Was it drug related?")
        .default(false)
        .interact()?;

    let (snapshot, diagnostic) = dashboard.fetch_full_table_with_diagnostic().await;
    commands::warn_diagnostic(diagnostic.as_deref());
    let options = stop_duration_options(&snapshot);
    let stop_duration: String = if options.is_empty() {
        Input::new().with_prompt("Stop duration").interact_text()?
    } else {
        let idx = Select::new()
            .with_prompt("Stop duration")
            .items(&options)
            .default(0)
            .interact()?;
        options[idx].clone()
    };

    let vehicle_number: String = Input::new().with_prompt("Vehicle number").interact_text()?;

    let input = NewStopLog {
        stop_date,
        stop_time,
        country_name,
        driver_gender: genders[gender_idx],
        driver_age,
        driver_race,
        search_conducted,
        search_type,
        drugs_stop,
        stop_duration,
        vehicle_number,
    };

    println!();
    commands::print_prediction(&snapshot, input)?;
    Ok(())
}
