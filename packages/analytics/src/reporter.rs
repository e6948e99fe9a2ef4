//! Runs catalog reports against the store.

use securecheck_analytics_models::{NO_RESULTS_NOTICE, ReportOutcome, ReportTier};
use securecheck_database::DataAccess;

use crate::{AnalyticsError, catalog};

/// Resolves `name` in `tier` and runs it with a fresh fetch.
///
/// A query that returns no rows yields [`ReportOutcome::Empty`]. So does
/// one that failed at the store, with the failure in its `diagnostic`.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownReportName`] if the catalog has no such
/// report.
pub async fn run_report(
    access: &DataAccess,
    tier: ReportTier,
    name: &str,
) -> Result<ReportOutcome, AnalyticsError> {
    let sql = catalog::resolve(tier, name)?;

    log::info!("Running {tier} report: {name}");
    let (table, diagnostic) = access.fetch_with_diagnostic(sql).await;

    if table.is_empty() {
        log::info!("Report returned no rows: {name}");
        return Ok(ReportOutcome::Empty {
            notice: NO_RESULTS_NOTICE.to_string(),
            diagnostic,
        });
    }

    Ok(ReportOutcome::Rows { table })
}

#[cfg(test)]
mod tests {
    use securecheck_database::db::SqliteConnector;

    use super::*;
    use crate::test_support::{SearchedStops, seed_police_check, temp_db_path};

    const MOST_SEARCHED_COUNTRY: &str = "Which country has the most stops with search conducted";

    #[tokio::test]
    async fn most_searched_country_ranks_first() {
        let path = temp_db_path();
        seed_police_check(
            &path,
            &[
                SearchedStops::new("A", 3, true),
                SearchedStops::new("B", 5, true),
                SearchedStops::new("A", 4, false),
            ],
        )
        .await;
        let access = DataAccess::new(SqliteConnector::new(path.clone()));

        let outcome = run_report(&access, ReportTier::Advanced, MOST_SEARCHED_COUNTRY)
            .await
            .unwrap();

        let table = outcome.table().expect("report should return rows");
        assert_eq!(table.column_names(), vec!["country_name", "search_count"]);
        let first = table.row(0).unwrap();
        assert!(first[0].equals_text("B"));
        assert!(first[1].loosely_equals_int(5));
        let second = table.row(1).unwrap();
        assert!(second[0].equals_text("A"));
        assert!(second[1].loosely_equals_int(3));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn rerunning_a_report_is_idempotent() {
        let path = temp_db_path();
        seed_police_check(
            &path,
            &[
                SearchedStops::new("Canada", 2, true),
                SearchedStops::new("India", 2, true),
                SearchedStops::new("USA", 1, true),
            ],
        )
        .await;
        let access = DataAccess::new(SqliteConnector::new(path.clone()));

        let first = run_report(&access, ReportTier::Advanced, MOST_SEARCHED_COUNTRY)
            .await
            .unwrap();
        let second = run_report(&access, ReportTier::Advanced, MOST_SEARCHED_COUNTRY)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(
            crate::render::render_report(&first),
            crate::render::render_report(&second)
        );

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn no_matching_rows_yields_notice() {
        let path = temp_db_path();
        seed_police_check(&path, &[SearchedStops::new("A", 2, false)]).await;
        let access = DataAccess::new(SqliteConnector::new(path.clone()));

        let outcome = run_report(&access, ReportTier::Advanced, MOST_SEARCHED_COUNTRY)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReportOutcome::Empty {
                notice: NO_RESULTS_NOTICE.to_string(),
                diagnostic: None,
            }
        );

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unreachable_store_explains_the_empty_outcome() {
        let missing = temp_db_path().join("nested").join("police.db");
        let access = DataAccess::new(SqliteConnector::new(missing));

        let outcome = run_report(&access, ReportTier::Advanced, MOST_SEARCHED_COUNTRY)
            .await
            .unwrap();

        assert!(outcome.table().is_none());
        assert!(outcome.diagnostic().is_some());
    }

    #[tokio::test]
    async fn unknown_report_fails_before_touching_the_store() {
        let access = DataAccess::new(SqliteConnector::new(temp_db_path()));

        let err = run_report(&access, ReportTier::Complex, MOST_SEARCHED_COUNTRY)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyticsError::UnknownReportName { .. }));
    }
}
