//! Actions shared by the subcommands and the interactive menu.
//!
//! Each action fetches what it needs through the [`Dashboard`], renders it
//! as text and prints it.

use securecheck_analytics::{
    AnalyticsError, Dashboard, build_chart_data, predict, render, report_names,
    stop_duration_options,
};
use securecheck_analytics_models::{ChartDimension, ReportTier};
use securecheck_database_models::TabularResult;
use securecheck_stop_models::NewStopLog;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// The snapshot offers no stop durations to choose from.
    #[error("No stop durations are available to choose from")]
    NoStopDurations,
}

/// Prints `diagnostic` to stderr, if there is one.
pub fn warn_diagnostic(diagnostic: Option<&str>) {
    if let Some(diagnostic) = diagnostic {
        eprintln!("Warning: {diagnostic}");
    }
}

/// Prints every row of `police_check`.
pub async fn show_table(dashboard: &Dashboard) {
    let (snapshot, diagnostic) = dashboard.fetch_full_table_with_diagnostic().await;
    warn_diagnostic(diagnostic.as_deref());
    if snapshot.is_empty() {
        println!("No stops found.");
        return;
    }
    println!("{}", render::render_table(&snapshot));
    println!("\n{} stop(s)", snapshot.row_count());
}

/// Prints the report names of `tier`, numbered in menu order.
pub fn list_reports(tier: ReportTier) {
    println!("{}", tier.heading());
    for (i, name) in report_names(tier).iter().enumerate() {
        println!("{:>3}. {name}", i + 1);
    }
}

/// Runs one report and prints its rows or its notice.
///
/// # Errors
///
/// * If `name` is not a report in `tier`
pub async fn show_report(
    dashboard: &Dashboard,
    tier: ReportTier,
    name: &str,
) -> Result<(), CommandError> {
    let outcome = dashboard.run_report(tier, name).await?;
    println!("{name}\n");
    println!("{}", render::render_report(&outcome));
    Ok(())
}

/// Prints all three charts from one snapshot.
pub async fn show_charts(dashboard: &Dashboard) {
    let (snapshot, diagnostic) = dashboard.fetch_full_table_with_diagnostic().await;
    warn_diagnostic(diagnostic.as_deref());
    for dimension in ChartDimension::all() {
        let chart = build_chart_data(&snapshot, *dimension);
        println!("{}\n", render::render_chart(&chart));
    }
}

/// Predicts and prints the outcome for `input`.
///
/// `input.stop_duration` may be left empty, in which case the first
/// duration seen in the data is used.
///
/// # Errors
///
/// * If the entered age is out of range
/// * If no duration was given and the data offers none
pub async fn show_prediction(
    dashboard: &Dashboard,
    input: NewStopLog,
) -> Result<(), CommandError> {
    let (snapshot, diagnostic) = dashboard.fetch_full_table_with_diagnostic().await;
    warn_diagnostic(diagnostic.as_deref());
    print_prediction(&snapshot, input)
}

/// Like [`show_prediction`], against a snapshot the caller already holds.
///
/// # Errors
///
/// * If the entered age is out of range
/// * If no duration was given and `snapshot` offers none
pub fn print_prediction(
    snapshot: &TabularResult,
    mut input: NewStopLog,
) -> Result<(), CommandError> {
    if input.stop_duration.is_empty() {
        input.stop_duration = stop_duration_options(snapshot)
            .into_iter()
            .next()
            .ok_or(CommandError::NoStopDurations)?;
    }

    let prediction = predict(snapshot, &input)?;
    println!("{}", render::render_prediction(&prediction));
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use securecheck_stop_models::Gender;

    use super::*;

    fn log_with(age: i64, duration: &str) -> NewStopLog {
        NewStopLog {
            stop_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            stop_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            country_name: "Canada".to_string(),
            driver_gender: Gender::Female,
            driver_age: age,
            driver_race: "White".to_string(),
            search_conducted: false,
            search_type: String::new(),
            drugs_stop: false,
            stop_duration: duration.to_string(),
            vehicle_number: "AB1234".to_string(),
        }
    }

    #[test]
    fn missing_duration_without_options_is_an_error() {
        let result = print_prediction(&TabularResult::empty(), log_with(40, ""));
        assert!(matches!(result, Err(CommandError::NoStopDurations)));
    }

    #[test]
    fn out_of_range_age_is_rejected() {
        let result = print_prediction(&TabularResult::empty(), log_with(101, "0-15 Min"));
        assert!(matches!(
            result,
            Err(CommandError::Analytics(AnalyticsError::InvalidInput(_)))
        ));
    }

    #[test]
    fn given_duration_predicts_defaults_on_empty_data() {
        let result = print_prediction(&TabularResult::empty(), log_with(40, "0-15 Min"));
        assert!(result.is_ok());
    }
}
