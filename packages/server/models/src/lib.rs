#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the `SecureCheck` server.
//!
//! These types are serialized to JSON for the REST API. Tables are sent
//! row-oriented, which is what grid widgets expect, even though the core
//! keeps them column-oriented.
//!
//! Responses built from store data carry an optional `diagnostic`. It is
//! set when the store could not be queried, so that an empty result can
//! be told apart from a store that is down.

use securecheck_analytics_models::{ChartData, PredictionResult, ReportOutcome, ReportTier};
use securecheck_database_models::{CellValue, TabularResult};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error body for non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// A table as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTable {
    /// Column names in query order.
    pub columns: Vec<String>,
    /// One entry per row, values in column order.
    pub rows: Vec<Vec<CellValue>>,
    /// Why the store could not be queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl ApiTable {
    /// Converts `table`, attaching the store failure that emptied it.
    #[must_use]
    pub fn with_diagnostic(table: &TabularResult, diagnostic: Option<String>) -> Self {
        Self {
            diagnostic,
            ..Self::from(table)
        }
    }
}

impl From<&TabularResult> for ApiTable {
    fn from(table: &TabularResult) -> Self {
        Self {
            columns: table
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            rows: table
                .rows()
                .map(|row| row.into_iter().cloned().collect())
                .collect(),
            diagnostic: None,
        }
    }
}

/// Query parameters for `GET /api/reports`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportListParams {
    /// Menu to list. Defaults to the advanced menu.
    pub tier: Option<ReportTier>,
}

/// Response for `GET /api/reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReportList {
    pub tier: ReportTier,
    pub heading: String,
    /// Report names in menu order.
    pub names: Vec<String>,
}

/// Body for `POST /api/reports/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReportRequest {
    pub tier: ReportTier,
    pub name: String,
}

/// Response for `POST /api/reports/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ApiReportOutcome {
    /// The report returned rows.
    Rows {
        /// The fetched rows.
        table: ApiTable,
    },
    /// The report returned nothing.
    Empty {
        /// Text to show in place of the table.
        notice: String,
        /// Why the store could not be queried.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diagnostic: Option<String>,
    },
}

impl From<&ReportOutcome> for ApiReportOutcome {
    fn from(outcome: &ReportOutcome) -> Self {
        match outcome {
            ReportOutcome::Rows { table } => Self::Rows {
                table: ApiTable::from(table),
            },
            ReportOutcome::Empty { notice, diagnostic } => Self::Empty {
                notice: notice.clone(),
                diagnostic: diagnostic.clone(),
            },
        }
    }
}

/// Response for `GET /api/charts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCharts {
    /// One dataset per chart, built from the same snapshot.
    pub charts: Vec<ChartData>,
    /// Why the store could not be queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Response for `GET /api/stop-durations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStopDurations {
    /// Distinct durations in first-seen order.
    pub options: Vec<String>,
    /// Why the store could not be queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Response for `POST /api/predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPrediction {
    #[serde(flatten)]
    pub prediction: PredictionResult,
    /// Why the store could not be queried; the prediction then fell back
    /// to the defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sent_row_oriented() {
        let table = TabularResult::from_rows(vec![
            vec![
                ("country_name".to_string(), CellValue::Text("B".to_string())),
                ("search_count".to_string(), CellValue::Int(5)),
            ],
            vec![
                ("country_name".to_string(), CellValue::Text("A".to_string())),
                ("search_count".to_string(), CellValue::Int(3)),
            ],
        ]);

        let json = serde_json::to_value(ApiTable::from(&table)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "columns": ["country_name", "search_count"],
                "rows": [["B", 5], ["A", 3]],
            })
        );
    }

    #[test]
    fn diagnostic_is_sent_only_when_present() {
        let ok = serde_json::to_value(ApiTable::from(&TabularResult::empty())).unwrap();
        assert!(ok.get("diagnostic").is_none());

        let failed = serde_json::to_value(ApiTable::with_diagnostic(
            &TabularResult::empty(),
            Some("Could not load data from the database".to_string()),
        ))
        .unwrap();
        assert_eq!(failed["diagnostic"], "Could not load data from the database");
        assert_eq!(failed["rows"], serde_json::json!([]));
    }

    #[test]
    fn empty_report_outcome_keeps_its_diagnostic() {
        let outcome = ApiReportOutcome::from(&ReportOutcome::Empty {
            notice: "No results".to_string(),
            diagnostic: Some("down".to_string()),
        });

        let json = serde_json::to_value(outcome).unwrap();

        assert_eq!(json["kind"], "empty");
        assert_eq!(json["diagnostic"], "down");
    }

    #[test]
    fn prediction_fields_sit_beside_the_diagnostic() {
        let json = serde_json::to_value(ApiPrediction {
            prediction: PredictionResult {
                predicted_violation: "Speeding".to_string(),
                predicted_outcome: "Warning".to_string(),
                matched_stops: 0,
                used_defaults: true,
                narrative: "A stop.".to_string(),
            },
            diagnostic: Some("down".to_string()),
        })
        .unwrap();

        assert_eq!(json["predictedOutcome"], "Warning");
        assert_eq!(json["usedDefaults"], true);
        assert_eq!(json["diagnostic"], "down");
    }

    #[test]
    fn run_request_accepts_snake_case_tier() {
        let request: RunReportRequest =
            serde_json::from_str(r#"{"tier":"complex","name":"Driver Demographics by Country"}"#)
                .unwrap();
        assert_eq!(request.tier, ReportTier::Complex);
    }
}
