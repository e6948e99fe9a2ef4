#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report, chart, and prediction types for the `SecureCheck` dashboard.
//!
//! These are the values the analytics layer hands to a presentation
//! adapter. They carry no rendering decisions beyond the chart kind and
//! title the dashboard has always used.

use securecheck_database_models::TabularResult;
use securecheck_stop_models::columns;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which report menu a report belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportTier {
    /// Single-table aggregations.
    Advanced,
    /// Window functions, joins, and ranking.
    Complex,
}

impl ReportTier {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Advanced, Self::Complex]
    }

    /// Menu heading for this tier.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Advanced => "Advanced insights",
            Self::Complex => "Complex insights",
        }
    }
}

/// A named, parameterless report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportDefinition {
    /// Menu label; also the lookup key.
    pub name: &'static str,
    /// Complete SQL text.
    pub sql: &'static str,
}

/// Notice shown when a report returns no rows.
pub const NO_RESULTS_NOTICE: &str = "No results found for the selected query";

/// Result of running a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportOutcome {
    /// The query returned rows; columns are in query order.
    Rows {
        /// The fetched rows.
        table: TabularResult,
    },
    /// The query returned nothing. Informational, not an error.
    Empty {
        /// Text to show in place of the table.
        notice: String,
        /// Why the store could not be queried, when that is the reason
        /// nothing came back.
        #[serde(skip_serializing_if = "Option::is_none")]
        diagnostic: Option<String>,
    },
}

impl ReportOutcome {
    /// Returns the rows, if any.
    #[must_use]
    pub const fn table(&self) -> Option<&TabularResult> {
        match self {
            Self::Rows { table } => Some(table),
            Self::Empty { .. } => None,
        }
    }

    /// Returns the store failure behind an empty outcome, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Rows { .. } => None,
            Self::Empty { diagnostic, .. } => diagnostic.as_deref(),
        }
    }
}

/// A column the dashboard charts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartDimension {
    Violation,
    DriverGender,
    DrugsStop,
}

/// How a chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

impl ChartDimension {
    /// Returns all variants of this enum, in tab order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Violation, Self::DriverGender, Self::DrugsStop]
    }

    /// Store column holding this dimension.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Violation => columns::VIOLATION,
            Self::DriverGender => columns::DRIVER_GENDER,
            Self::DrugsStop => columns::DRUGS_STOP,
        }
    }

    #[must_use]
    pub const fn kind(self) -> ChartKind {
        match self {
            Self::Violation | Self::DrugsStop => ChartKind::Bar,
            Self::DriverGender => ChartKind::Pie,
        }
    }

    /// Chart title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Violation => "Stops by Violation Type",
            Self::DriverGender => "Driver Gender Distribution",
            Self::DrugsStop => "Drug-Related Stops",
        }
    }

    /// Axis/legend label for the category values.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Violation => "Violation",
            Self::DriverGender => "Driver Gender",
            Self::DrugsStop => "Drug-Related Stops",
        }
    }

    /// Notice shown when the chart cannot be built.
    #[must_use]
    pub fn no_data_notice(self) -> String {
        format!("No data available for {} chart.", self.label())
    }
}

/// How often one value occurs in a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyCount {
    /// The value, rendered as text.
    pub value: String,
    /// Number of rows holding it.
    pub count: u64,
}

/// Frequency distribution for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub dimension: ChartDimension,
    pub kind: ChartKind,
    pub title: &'static str,
    /// Most frequent first. Empty when `notice` is set.
    pub counts: Vec<FrequencyCount>,
    /// Set when the table is empty or lacks the column.
    pub notice: Option<String>,
}

impl ChartData {
    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Count for `value`, or 0.
    #[must_use]
    pub fn count_of(&self, value: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.value == value)
            .map_or(0, |c| c.count)
    }
}

/// Outcome predicted when no historical stop matches the filter.
pub const DEFAULT_OUTCOME: &str = "Warning";

/// Violation predicted when no historical stop matches the filter.
pub const DEFAULT_VIOLATION: &str = "Speeding";

/// Result of predicting a stop's outcome and violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_violation: String,
    pub predicted_outcome: String,
    /// Number of historical stops that matched the filter.
    pub matched_stops: usize,
    /// `true` when nothing matched and the defaults were used.
    pub used_defaults: bool,
    /// Plain-language summary of the entered stop and the prediction.
    pub narrative: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_round_trip_through_strings() {
        for tier in ReportTier::all() {
            assert_eq!(tier.to_string().parse::<ReportTier>().unwrap(), *tier);
        }
        assert_eq!(ReportTier::Complex.as_ref(), "complex");
    }

    #[test]
    fn dimensions_map_to_store_columns() {
        assert_eq!(ChartDimension::DriverGender.column(), "driver_gender");
        assert_eq!(ChartDimension::DrugsStop.kind(), ChartKind::Bar);
        assert_eq!(ChartDimension::DriverGender.kind(), ChartKind::Pie);
        assert_eq!(
            ChartDimension::Violation.no_data_notice(),
            "No data available for Violation chart."
        );
    }

    #[test]
    fn empty_outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(ReportOutcome::Empty {
            notice: NO_RESULTS_NOTICE.to_string(),
            diagnostic: None,
        })
        .unwrap();
        assert_eq!(json["kind"], "empty");
        assert_eq!(json["notice"], NO_RESULTS_NOTICE);
        assert!(json.get("diagnostic").is_none());
    }
}
