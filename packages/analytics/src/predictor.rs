//! Lookup-table outcome "prediction".
//!
//! This is not a model. A new stop is matched by exact equality on five
//! fields against the historical snapshot, and the most common outcome and
//! violation among the matches are reported. When nothing matches, fixed
//! defaults are returned. The entered stop is never written to the store.

use std::collections::BTreeMap;

use securecheck_analytics_models::{DEFAULT_OUTCOME, DEFAULT_VIOLATION, PredictionResult};
use securecheck_database_models::{Column, TabularResult};
use securecheck_stop_models::{NewStopLog, columns};

use crate::AnalyticsError;

/// Predicts the outcome and violation for `input` from `snapshot`.
///
/// The outcome and violation modes are computed independently over the
/// same matched rows, so they need not come from a single stop. Among
/// equally frequent values the lexicographically smallest wins.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] if the entered age is outside
/// the range the entry form accepts.
pub fn predict(
    snapshot: &TabularResult,
    input: &NewStopLog,
) -> Result<PredictionResult, AnalyticsError> {
    input.validate()?;

    let matched = matching_rows(snapshot, input);
    log::debug!("{} historical stop(s) match the entered filter", matched.len());

    let (predicted_outcome, predicted_violation) = if matched.is_empty() {
        (DEFAULT_OUTCOME.to_string(), DEFAULT_VIOLATION.to_string())
    } else {
        (
            column_mode(snapshot, columns::STOP_OUTCOME, &matched)
                .unwrap_or_else(|| DEFAULT_OUTCOME.to_string()),
            column_mode(snapshot, columns::VIOLATION, &matched)
                .unwrap_or_else(|| DEFAULT_VIOLATION.to_string()),
        )
    };

    let narrative = narrative(input, &predicted_violation, &predicted_outcome);

    Ok(PredictionResult {
        predicted_violation,
        predicted_outcome,
        matched_stops: matched.len(),
        used_defaults: matched.is_empty(),
        narrative,
    })
}

/// Distinct non-null `stop_duration` values in first-seen order.
///
/// These are the only durations the entry form offers.
#[must_use]
pub fn stop_duration_options(snapshot: &TabularResult) -> Vec<String> {
    let Some(column) = snapshot.column(columns::STOP_DURATION) else {
        return Vec::new();
    };

    let mut options: Vec<String> = Vec::new();
    for value in column.values.iter().filter(|v| !v.is_null()) {
        let value = value.to_string();
        if !options.contains(&value) {
            options.push(value);
        }
    }
    options
}

/// Summarizes the entered stop and the prediction in one paragraph.
#[must_use]
pub fn narrative(input: &NewStopLog, violation: &str, outcome: &str) -> String {
    let search_text = if input.search_conducted {
        "A search was conducted"
    } else {
        "No search was conducted"
    };
    let drugs_text = if input.drugs_stop {
        "was drug-related"
    } else {
        "was not drug-related"
    };

    format!(
        "A {age}-year-old {gender} driver in {country} was stopped at {time} on {date}. \
         {search_text}, and the stop {drugs_text}. \
         Stop duration: {duration}. Vehicle number: {vehicle}. \
         Predicted violation: {violation}. Predicted outcome: {outcome}.",
        age = input.driver_age,
        gender = input.driver_gender,
        country = input.country_name,
        time = input.stop_time.format("%I:%M %p"),
        date = input.stop_date,
        duration = input.stop_duration,
        vehicle = input.vehicle_number,
    )
}

/// Indices of rows matching all five filter fields.
///
/// A snapshot missing any filter column matches nothing.
fn matching_rows(snapshot: &TabularResult, input: &NewStopLog) -> Vec<usize> {
    let lookup = |name: &str| {
        let column = snapshot.column(name);
        if column.is_none() && !snapshot.is_empty() {
            log::warn!("Snapshot has no '{name}' column; no stops can match");
        }
        column
    };

    let (Some(gender), Some(age), Some(searched), Some(duration), Some(drugs)) = (
        lookup(columns::DRIVER_GENDER),
        lookup(columns::DRIVER_AGE),
        lookup(columns::SEARCH_CONDUCTED),
        lookup(columns::STOP_DURATION),
        lookup(columns::DRUGS_STOP),
    ) else {
        return Vec::new();
    };

    let gender_text = input.driver_gender.as_ref();
    let searched_flag = i64::from(input.search_conducted);
    let drugs_flag = i64::from(input.drugs_stop);

    (0..snapshot.row_count())
        .filter(|&idx| {
            gender.values[idx].equals_text(gender_text)
                && age.values[idx].loosely_equals_int(input.driver_age)
                && searched.values[idx].loosely_equals_int(searched_flag)
                && duration.values[idx].equals_text(&input.stop_duration)
                && drugs.values[idx].loosely_equals_int(drugs_flag)
        })
        .collect()
}

fn column_mode(snapshot: &TabularResult, name: &str, rows: &[usize]) -> Option<String> {
    let Some(column) = snapshot.column(name) else {
        log::warn!("Snapshot has no '{name}' column; using the default");
        return None;
    };
    mode(column, rows)
}

/// Most frequent non-null value among `rows`; ties go to the smallest.
fn mode(column: &Column, rows: &[usize]) -> Option<String> {
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for value in rows
        .iter()
        .filter_map(|&idx| column.values.get(idx))
        .filter(|v| !v.is_null())
    {
        *tally.entry(value.to_string()).or_default() += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for (value, count) in tally {
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
