#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Query result types for the `SecureCheck` dashboard.
//!
//! Every fetch from the store materializes into a [`TabularResult`]: an
//! ordered list of named [`Column`]s holding [`CellValue`]s. The shape is
//! column-oriented because every consumer (charts, the predictor's mode
//! computation) works one column at a time; row access is provided for
//! rendering.

use chrono::NaiveDateTime;
use securecheck_stop_models::{StopRecord, columns};
use serde::{Deserialize, Serialize};

/// A single cell as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// SQL `NULL`.
    Null,
    /// Boolean column value.
    Bool(bool),
    /// Any integer column value, widened to `i64`.
    Int(i64),
    /// Floating point or numeric column value.
    Real(f64),
    /// Text column value.
    Text(String),
    /// Date/time column value.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Returns `true` if this is SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compares against an integer the way a 0/1 form field compares
    /// against a loosely-typed store column: booleans count as 0/1 and
    /// whole reals equal their integer value.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn loosely_equals_int(&self, n: i64) -> bool {
        match self {
            Self::Int(v) => *v == n,
            Self::Bool(b) => i64::from(*b) == n,
            Self::Real(v) => *v == n as f64,
            Self::Null | Self::Text(_) | Self::DateTime(_) => false,
        }
    }

    /// Compares against text exactly. Non-text values never match.
    #[must_use]
    pub fn equals_text(&self, s: &str) -> bool {
        matches!(self, Self::Text(v) if v == s)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as returned by the query.
    pub name: String,
    /// One value per row.
    pub values: Vec<CellValue>,
}

/// An in-memory, column-oriented query result.
///
/// All columns hold the same number of values. A result fetched from the
/// store with zero rows has zero columns, since column names are taken
/// from the rows themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabularResult {
    columns: Vec<Column>,
}

impl TabularResult {
    /// Returns a result with no columns and no rows.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Builds a result from rows of `(column name, value)` pairs.
    ///
    /// The first row fixes the column names and order. Later rows are read
    /// positionally; a short row is padded with [`CellValue::Null`].
    #[must_use]
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<(String, CellValue)>>,
    {
        let mut columns: Vec<Column> = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            if idx == 0 {
                columns = row
                    .into_iter()
                    .map(|(name, value)| Column {
                        name,
                        values: vec![value],
                    })
                    .collect();
                continue;
            }

            let mut cells = row.into_iter().map(|(_, value)| value);
            for column in &mut columns {
                column.values.push(cells.next().unwrap_or(CellValue::Null));
            }
        }

        Self { columns }
    }

    /// Builds a `police_check`-shaped result from typed records.
    #[must_use]
    pub fn from_records(records: &[StopRecord]) -> Self {
        if records.is_empty() {
            return Self::empty();
        }

        Self::from_rows(records.iter().map(|r| {
            vec![
                (
                    columns::STOP_DATE.to_string(),
                    r.stop_date.map_or(CellValue::Null, |d| {
                        CellValue::Text(d.format("%Y-%m-%d").to_string())
                    }),
                ),
                (
                    columns::STOP_TIME.to_string(),
                    r.stop_time.map_or(CellValue::Null, |t| {
                        CellValue::Text(t.format("%H:%M:%S").to_string())
                    }),
                ),
                (
                    columns::TIMESTAMP.to_string(),
                    r.timestamp.map_or(CellValue::Null, CellValue::DateTime),
                ),
                (
                    columns::COUNTRY_NAME.to_string(),
                    CellValue::Text(r.country_name.clone()),
                ),
                (
                    columns::DRIVER_GENDER.to_string(),
                    CellValue::Text(r.driver_gender.to_string()),
                ),
                (columns::DRIVER_AGE.to_string(), CellValue::Int(r.driver_age)),
                (
                    columns::DRIVER_RACE.to_string(),
                    CellValue::Text(r.driver_race.clone()),
                ),
                (
                    columns::SEARCH_CONDUCTED.to_string(),
                    CellValue::Int(i64::from(r.search_conducted)),
                ),
                (
                    columns::SEARCH_TYPE.to_string(),
                    CellValue::from(r.search_type.clone()),
                ),
                (
                    columns::DRUGS_STOP.to_string(),
                    CellValue::Int(i64::from(r.drugs_stop)),
                ),
                (
                    columns::STOP_DURATION.to_string(),
                    CellValue::Text(r.stop_duration.clone()),
                ),
                (
                    columns::STOP_OUTCOME.to_string(),
                    CellValue::Text(r.stop_outcome.clone()),
                ),
                (
                    columns::VIOLATION.to_string(),
                    CellValue::Text(r.violation.clone()),
                ),
                (
                    columns::VEHICLE_NUMBER.to_string(),
                    CellValue::Text(r.vehicle_number.clone()),
                ),
            ]
        }))
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// All columns in query order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in query order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a column by exact name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the values of row `idx` in column order, or `None` if out
    /// of range.
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<Vec<&CellValue>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count()).filter_map(|idx| self.row(idx))
    }
}
