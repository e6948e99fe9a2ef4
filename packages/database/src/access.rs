//! Query execution against the store.

use securecheck_database_models::{CellValue, TabularResult};
use switchy_database::{DatabaseValue, Row};

use crate::DbError;
use crate::config::DatabaseConfig;
use crate::db::{Connector, PostgresConnector};

/// Runs SQL against the store, one connection per call.
///
/// No parameter binding or escaping happens here: callers pass complete
/// SQL. The dashboard only ever sends catalog queries and the full-table
/// query, never text built from form input.
pub struct DataAccess {
    connector: Box<dyn Connector>,
}

impl std::fmt::Debug for DataAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataAccess")
            .field("target", &self.connector.describe())
            .finish()
    }
}

impl DataAccess {
    /// Wraps an arbitrary connector.
    #[must_use]
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
        }
    }

    /// Connects to `PostgreSQL` using `config`.
    #[must_use]
    pub fn from_config(config: DatabaseConfig) -> Self {
        Self::new(PostgresConnector::new(config))
    }

    /// Runs `query` and returns every row.
    ///
    /// Never fails: connection and query errors are logged and yield an
    /// empty result (zero rows, zero columns).
    pub async fn fetch(&self, query: &str) -> TabularResult {
        self.fetch_with_diagnostic(query).await.0
    }

    /// Like [`Self::fetch`], also returning a message for the user when
    /// the query failed.
    ///
    /// The message is `None` exactly when the store answered; an empty
    /// result with no message means the query matched nothing.
    pub async fn fetch_with_diagnostic(&self, query: &str) -> (TabularResult, Option<String>) {
        match self.try_fetch(query).await {
            Ok(table) => (table, None),
            Err(e) => {
                log::error!(
                    "Query against {} failed: {e}",
                    self.connector.describe()
                );
                (
                    TabularResult::empty(),
                    Some(format!("Could not load data from the database: {e}")),
                )
            }
        }
    }

    /// Runs `query` and returns every row, surfacing failures.
    ///
    /// The connection is dropped before this returns, on success and on
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if connecting or executing fails.
    pub async fn try_fetch(&self, query: &str) -> Result<TabularResult, DbError> {
        let db = self.connector.connect().await?;
        let rows = db.query_raw_params(query, &[]).await;
        drop(db);
        let rows = rows?;

        log::debug!("Fetched {} row(s)", rows.len());

        Ok(TabularResult::from_rows(rows.into_iter().map(row_cells)))
    }
}

fn row_cells(row: Row) -> Vec<(String, CellValue)> {
    row.columns
        .into_iter()
        .map(|(name, value)| (name, to_cell(value)))
        .collect()
}

fn to_cell(value: DatabaseValue) -> CellValue {
    match value {
        DatabaseValue::Null => CellValue::Null,
        DatabaseValue::String(s) => CellValue::Text(s),
        DatabaseValue::StringOpt(s) => s.map_or(CellValue::Null, CellValue::Text),
        DatabaseValue::Bool(b) => CellValue::Bool(b),
        DatabaseValue::BoolOpt(b) => b.map_or(CellValue::Null, CellValue::Bool),
        DatabaseValue::Int8(v) => CellValue::Int(i64::from(v)),
        DatabaseValue::Int8Opt(v) => int_cell(v),
        DatabaseValue::Int16(v) => CellValue::Int(i64::from(v)),
        DatabaseValue::Int16Opt(v) => int_cell(v),
        DatabaseValue::Int32(v) => CellValue::Int(i64::from(v)),
        DatabaseValue::Int32Opt(v) => int_cell(v),
        DatabaseValue::Int64(v) => CellValue::Int(v),
        DatabaseValue::Int64Opt(v) => int_cell(v),
        DatabaseValue::UInt8(v) => CellValue::Int(i64::from(v)),
        DatabaseValue::UInt8Opt(v) => int_cell(v),
        DatabaseValue::UInt16(v) => CellValue::Int(i64::from(v)),
        DatabaseValue::UInt16Opt(v) => int_cell(v),
        DatabaseValue::UInt32(v) => CellValue::Int(i64::from(v)),
        DatabaseValue::UInt32Opt(v) => int_cell(v),
        DatabaseValue::UInt64(v) => unsigned_cell(v),
        DatabaseValue::UInt64Opt(v) => v.map_or(CellValue::Null, unsigned_cell),
        DatabaseValue::Real32(v) => CellValue::Real(f64::from(v)),
        DatabaseValue::Real32Opt(v) => v.map_or(CellValue::Null, |v| CellValue::Real(f64::from(v))),
        DatabaseValue::Real64(v) => CellValue::Real(v),
        DatabaseValue::Real64Opt(v) => v.map_or(CellValue::Null, CellValue::Real),
        DatabaseValue::DateTime(dt) => CellValue::DateTime(dt),
        other => CellValue::Text(format!("{other:?}")),
    }
}

fn int_cell<T: Into<i64>>(value: Option<T>) -> CellValue {
    value.map_or(CellValue::Null, |v| CellValue::Int(v.into()))
}

/// Values past `i64::MAX` keep their magnitude as a float.
#[allow(clippy::cast_precision_loss)]
fn unsigned_cell(value: u64) -> CellValue {
    i64::try_from(value).map_or(CellValue::Real(value as f64), CellValue::Int)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use async_trait::async_trait;
    use switchy_database::Database;

    use super::*;
    use crate::db::SqliteConnector;

    struct RefusingConnector;

    #[async_trait]
    impl Connector for RefusingConnector {
        async fn connect(&self) -> Result<Box<dyn Database>, DbError> {
            Err(DbError::Connection {
                message: "connection refused".to_string(),
            })
        }

        fn describe(&self) -> String {
            "refusing".to_string()
        }
    }

    fn temp_db_path() -> PathBuf {
        std::env::temp_dir().join(format!("securecheck-access-{}.db", uuid::Uuid::new_v4()))
    }

    async fn seeded(path: &Path) {
        let db = SqliteConnector::new(path).connect().await.unwrap();
        db.exec_raw(
            "CREATE TABLE police_check (country_name TEXT, driver_age INTEGER, violation TEXT)",
        )
        .await
        .unwrap();
        db.exec_raw(
            "INSERT INTO police_check VALUES ('Canada', 22, 'Speeding'), ('India', 41, NULL)",
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn refused_connection_yields_empty_result() {
        let access = DataAccess::new(RefusingConnector);

        let table = access.fetch("SELECT * FROM police_check").await;

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(matches!(
            access.try_fetch("SELECT 1").await,
            Err(DbError::Connection { .. })
        ));
    }

    #[tokio::test]
    async fn unopenable_file_yields_empty_result() {
        let path = std::env::temp_dir()
            .join(format!("securecheck-missing-{}", uuid::Uuid::new_v4()))
            .join("nested")
            .join("police.db");
        let access = DataAccess::new(SqliteConnector::new(path));

        let table = access.fetch("SELECT * FROM police_check").await;

        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[tokio::test]
    async fn fetch_materializes_query_columns_in_order() {
        let path = temp_db_path();
        seeded(&path).await;
        let access = DataAccess::new(SqliteConnector::new(path.clone()));

        let table = access
            .fetch("SELECT violation, country_name FROM police_check ORDER BY driver_age")
            .await;

        assert_eq!(table.column_names(), vec!["violation", "country_name"]);
        assert_eq!(table.row_count(), 2);
        assert!(
            access
                .fetch_with_diagnostic("SELECT violation FROM police_check")
                .await
                .1
                .is_none()
        );
        assert!(table.column("violation").unwrap().values[0].equals_text("Speeding"));
        assert!(table.column("violation").unwrap().values[1].is_null());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn numeric_values_of_every_width_become_numbers() {
        assert_eq!(to_cell(DatabaseValue::Int8(-3)), CellValue::Int(-3));
        assert_eq!(to_cell(DatabaseValue::Int16(1200)), CellValue::Int(1200));
        assert_eq!(to_cell(DatabaseValue::Int32(41)), CellValue::Int(41));
        assert_eq!(to_cell(DatabaseValue::Int64(7)), CellValue::Int(7));
        assert_eq!(to_cell(DatabaseValue::UInt8(200)), CellValue::Int(200));
        assert_eq!(to_cell(DatabaseValue::UInt16(65_000)), CellValue::Int(65_000));
        assert_eq!(to_cell(DatabaseValue::UInt32(70_000)), CellValue::Int(70_000));
        assert_eq!(to_cell(DatabaseValue::UInt64(12)), CellValue::Int(12));
        assert_eq!(
            to_cell(DatabaseValue::UInt64(u64::MAX)),
            CellValue::Real(18_446_744_073_709_551_615.0)
        );
        assert_eq!(to_cell(DatabaseValue::Real32(2.5)), CellValue::Real(2.5));
        assert_eq!(to_cell(DatabaseValue::Real64(12.5)), CellValue::Real(12.5));
    }

    #[test]
    fn optional_values_unwrap_or_become_null() {
        assert_eq!(to_cell(DatabaseValue::Int16Opt(Some(5))), CellValue::Int(5));
        assert_eq!(to_cell(DatabaseValue::Int16Opt(None)), CellValue::Null);
        assert_eq!(to_cell(DatabaseValue::Int64Opt(Some(9))), CellValue::Int(9));
        assert_eq!(to_cell(DatabaseValue::UInt32Opt(None)), CellValue::Null);
        assert_eq!(to_cell(DatabaseValue::UInt64Opt(Some(3))), CellValue::Int(3));
        assert_eq!(to_cell(DatabaseValue::Real32Opt(Some(0.5))), CellValue::Real(0.5));
        assert_eq!(to_cell(DatabaseValue::Real64Opt(None)), CellValue::Null);
        assert_eq!(
            to_cell(DatabaseValue::StringOpt(Some("Arrest".to_string()))),
            CellValue::Text("Arrest".to_string())
        );
        assert_eq!(to_cell(DatabaseValue::StringOpt(None)), CellValue::Null);
        assert_eq!(to_cell(DatabaseValue::BoolOpt(Some(true))), CellValue::Bool(true));
        assert_eq!(to_cell(DatabaseValue::BoolOpt(None)), CellValue::Null);
    }

    #[tokio::test]
    async fn failed_fetch_carries_a_diagnostic() {
        let access = DataAccess::new(RefusingConnector);

        let (table, diagnostic) = access.fetch_with_diagnostic("SELECT 1").await;

        assert!(table.is_empty());
        assert!(diagnostic.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn bad_sql_yields_empty_result() {
        let path = temp_db_path();
        seeded(&path).await;
        let access = DataAccess::new(SqliteConnector::new(path.clone()));

        let table = access.fetch("SELECT nope FROM missing_table").await;

        assert!(table.is_empty());
        assert!(matches!(
            access.try_fetch("SELECT nope FROM missing_table").await,
            Err(DbError::Database(_))
        ));

        let _ = std::fs::remove_file(path);
    }
}
