//! Plain-text rendering for terminal output.
//!
//! Tables render verbatim in query column order. Charts render as a
//! value/count/share table; drawing is left to whatever presents them.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use securecheck_analytics_models::{ChartData, PredictionResult, ReportOutcome};
use securecheck_database_models::TabularResult;

/// Renders `table` as a bordered text table.
#[must_use]
pub fn render_table(table: &TabularResult) -> String {
    let rows = table
        .rows()
        .map(|row| row.into_iter().map(ToString::to_string).collect::<Vec<_>>());
    as_text_table(table.column_names(), rows)
}

/// Renders a report's rows, or its notice when it returned nothing.
///
/// A store failure is shown under the notice.
#[must_use]
pub fn render_report(outcome: &ReportOutcome) -> String {
    match outcome {
        ReportOutcome::Rows { table } => render_table(table),
        ReportOutcome::Empty {
            notice,
            diagnostic: None,
        } => notice.clone(),
        ReportOutcome::Empty {
            notice,
            diagnostic: Some(diagnostic),
        } => format!("{notice}\n{diagnostic}"),
    }
}

/// Renders a chart's frequency table, or its notice.
#[must_use]
pub fn render_chart(chart: &ChartData) -> String {
    if let Some(notice) = &chart.notice {
        return format!("{}\n{notice}", chart.title);
    }

    let total = chart.total();
    let rows = chart.counts.iter().map(|c| {
        #[allow(clippy::cast_precision_loss)]
        let share = if total == 0 {
            0.0
        } else {
            c.count as f64 * 100.0 / total as f64
        };
        vec![c.value.clone(), c.count.to_string(), format!("{share:.1}%")]
    });

    format!(
        "{}\n{}",
        chart.title,
        as_text_table([chart.dimension.label(), "Count", "Share"], rows)
    )
}

/// Renders the prediction summary block.
#[must_use]
pub fn render_prediction(prediction: &PredictionResult) -> String {
    let basis = if prediction.used_defaults {
        "no matching historical stops; defaults used".to_string()
    } else {
        format!("{} matching historical stop(s)", prediction.matched_stops)
    };

    format!(
        "Prediction Summary\n\
         - Predicted violation: {}\n\
         - Predicted outcome: {}\n\
         - Based on: {basis}\n\n\
         {}",
        prediction.predicted_violation, prediction.predicted_outcome, prediction.narrative
    )
}

fn as_text_table<T, U, V, W>(headers: T, rows: U) -> String
where
    T: IntoIterator,
    T::Item: Into<comfy_table::Cell>,
    U: IntoIterator<Item = V>,
    V: IntoIterator<Item = W>,
    W: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}
