#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reporting core of the `SecureCheck` dashboard.
//!
//! The [`catalog`] holds the canned report queries, the [`reporter`] runs
//! them, [`charts`] and [`predictor`] work on a full-table snapshot the
//! caller fetched once, and [`render`] formats all of it as text.
//! [`Dashboard`] holds the store handle for the operations that fetch; the
//! snapshot operations are plain functions re-exported at the crate root.

pub mod catalog;
pub mod charts;
pub mod predictor;
pub mod render;
pub mod reporter;

pub use catalog::report_names;
pub use charts::{build_all_charts, build_chart_data};
pub use predictor::{predict, stop_duration_options};
use securecheck_analytics_models::{ReportOutcome, ReportTier};
use securecheck_database::DataAccess;
use securecheck_database_models::TabularResult;
use securecheck_stop_models::InvalidAgeError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A report name is not in the selected menu. Menus are generated from
    /// the catalog, so this indicates a caller bug.
    #[error("Unknown {tier} report: {name}")]
    UnknownReportName {
        /// Menu that was searched.
        tier: ReportTier,
        /// Name that was not found.
        name: String,
    },

    /// The entered stop failed form validation.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidAgeError),
}

/// The operations that read the store.
///
/// Holds only the store handle. Snapshots are returned to the caller and
/// passed back in explicitly, so one interaction's charts and prediction
/// see the same data while the next interaction fetches afresh.
#[derive(Debug)]
pub struct Dashboard {
    access: DataAccess,
}

impl Dashboard {
    #[must_use]
    pub const fn new(access: DataAccess) -> Self {
        Self { access }
    }

    /// Fetches every row of `police_check`.
    pub async fn fetch_full_table(&self) -> TabularResult {
        self.access.fetch(catalog::FULL_TABLE_QUERY).await
    }

    /// Like [`Self::fetch_full_table`], also returning the reason the
    /// snapshot is empty when the store could not be queried.
    pub async fn fetch_full_table_with_diagnostic(&self) -> (TabularResult, Option<String>) {
        self.access
            .fetch_with_diagnostic(catalog::FULL_TABLE_QUERY)
            .await
    }

    /// Runs a catalog report with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownReportName`] if the report does not
    /// exist in `tier`.
    pub async fn run_report(
        &self,
        tier: ReportTier,
        name: &str,
    ) -> Result<ReportOutcome, AnalyticsError> {
        reporter::run_report(&self.access, tier, name).await
    }
}


#[cfg(test)]
mod tests {
    use securecheck_database::db::SqliteConnector;

    use securecheck_analytics_models::ChartDimension;

    use super::*;
    use crate::test_support::{SearchedStops, seed_police_check, temp_db_path};

    #[tokio::test]
    async fn snapshot_feeds_charts_and_prediction() {
        let path = temp_db_path();
        seed_police_check(
            &path,
            &[
                SearchedStops::new("Canada", 2, true),
                SearchedStops::new("India", 1, false),
            ],
        )
        .await;
        let dashboard = Dashboard::new(DataAccess::new(SqliteConnector::new(path.clone())));

        let snapshot = dashboard.fetch_full_table().await;
        assert_eq!(snapshot.row_count(), 3);

        let chart = build_chart_data(&snapshot, ChartDimension::Violation);
        assert_eq!(chart.count_of("Speeding"), 3);

        let input = crate::test_support::new_log(
            securecheck_stop_models::Gender::Male,
            30,
            true,
            "0-15 Min",
            false,
        );
        let prediction = predict(&snapshot, &input).unwrap();
        assert_eq!(prediction.matched_stops, 2);
        assert_eq!(prediction.predicted_outcome, "Citation");

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unreachable_store_degrades_to_empty_views() {
        let missing = temp_db_path().join("nested").join("police.db");
        let dashboard = Dashboard::new(DataAccess::new(SqliteConnector::new(missing)));

        let (snapshot, diagnostic) = dashboard.fetch_full_table_with_diagnostic().await;
        assert!(snapshot.is_empty());
        assert!(diagnostic.is_some());

        for dimension in ChartDimension::all() {
            assert!(build_chart_data(&snapshot, *dimension).notice.is_some());
        }

        let outcome = dashboard
            .run_report(
                ReportTier::Advanced,
                "Which country has the most stops with search conducted",
            )
            .await
            .unwrap();
        assert!(outcome.table().is_none());
        assert!(outcome.diagnostic().is_some());
    }

    #[tokio::test]
    async fn reachable_store_has_no_diagnostic() {
        let path = temp_db_path();
        seed_police_check(&path, &[SearchedStops::new("Canada", 1, false)]).await;
        let dashboard = Dashboard::new(DataAccess::new(SqliteConnector::new(path.clone())));

        let (snapshot, diagnostic) = dashboard.fetch_full_table_with_diagnostic().await;

        assert_eq!(snapshot.row_count(), 1);
        assert!(diagnostic.is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn menus_come_from_the_catalog() {
        assert_eq!(report_names(ReportTier::Complex).len(), 6);
    }
}
