//! Frequency distributions behind the dashboard's charts.
//!
//! Charts are built from the full-table snapshot the caller already
//! fetched; nothing here touches the store. Each chart degrades on its
//! own: a missing column blanks that chart and leaves the others alone.

use std::collections::BTreeMap;

use securecheck_analytics_models::{ChartData, ChartDimension, FrequencyCount};
use securecheck_database_models::{CellValue, TabularResult};

/// Counts the distinct values of `dimension`'s column in `snapshot`.
///
/// Returns empty counts plus a notice when the snapshot has no rows or
/// lacks the column. Null cells are not counted.
#[must_use]
pub fn build_chart_data(snapshot: &TabularResult, dimension: ChartDimension) -> ChartData {
    let column = if snapshot.is_empty() {
        None
    } else {
        snapshot.column(dimension.column())
    };

    let Some(column) = column else {
        log::warn!(
            "No '{}' data for the {} chart",
            dimension.column(),
            dimension.label()
        );
        return ChartData {
            dimension,
            kind: dimension.kind(),
            title: dimension.title(),
            counts: Vec::new(),
            notice: Some(dimension.no_data_notice()),
        };
    };

    ChartData {
        dimension,
        kind: dimension.kind(),
        title: dimension.title(),
        counts: frequency_counts(&column.values),
        notice: None,
    }
}

/// Builds every chart, in tab order.
#[must_use]
pub fn build_all_charts(snapshot: &TabularResult) -> Vec<ChartData> {
    ChartDimension::all()
        .iter()
        .map(|dimension| build_chart_data(snapshot, *dimension))
        .collect()
}

/// Most frequent first; ties ordered by value.
fn frequency_counts(values: &[CellValue]) -> Vec<FrequencyCount> {
    let mut tally: BTreeMap<String, u64> = BTreeMap::new();
    for value in values.iter().filter(|v| !v.is_null()) {
        *tally.entry(value.to_string()).or_default() += 1;
    }

    let mut counts: Vec<FrequencyCount> = tally
        .into_iter()
        .map(|(value, count)| FrequencyCount { value, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use securecheck_database_models::Column;

    use super::*;
    use crate::test_support::{stop, table_of};

    #[test]
    fn empty_snapshot_blanks_every_chart() {
        let charts = build_all_charts(&TabularResult::empty());

        assert_eq!(charts.len(), 3);
        for chart in charts {
            assert!(chart.counts.is_empty());
            assert_eq!(chart.notice, Some(chart.dimension.no_data_notice()));
        }
    }

    #[test]
    fn violation_counts_sum_to_row_count() {
        let mut stops = Vec::new();
        for i in 0..100 {
            let violation = match i % 10 {
                0..=5 => "Speeding",
                6 | 7 => "Seatbelt",
                8 => "DUI",
                _ => "Signal",
            };
            stops.push(stop("male", 30, false, "0-15 Min", false, "Citation", violation));
        }
        let snapshot = table_of(&stops);

        let chart = build_chart_data(&snapshot, ChartDimension::Violation);

        assert_eq!(chart.count_of("Speeding"), 60);
        assert_eq!(chart.total(), 100);
        assert_eq!(chart.counts[0].value, "Speeding");
        assert!(chart.notice.is_none());
    }

    #[test]
    fn missing_column_only_blanks_its_own_chart() {
        let snapshot = TabularResult::from_rows(vec![
            vec![
                ("violation".to_string(), CellValue::Text("DUI".to_string())),
                ("drugs_stop".to_string(), CellValue::Bool(true)),
            ],
            vec![
                ("violation".to_string(), CellValue::Text("Speeding".to_string())),
                ("drugs_stop".to_string(), CellValue::Bool(false)),
            ],
        ]);

        let charts = build_all_charts(&snapshot);

        let gender = &charts[1];
        assert_eq!(gender.dimension, ChartDimension::DriverGender);
        assert!(gender.counts.is_empty());
        assert!(gender.notice.is_some());

        assert_eq!(charts[0].total(), 2);
        assert_eq!(charts[2].count_of("true"), 1);
        assert_eq!(charts[2].count_of("false"), 1);
    }

    #[test]
    fn nulls_are_not_counted() {
        let snapshot = TabularResult::from_rows(vec![
            vec![("driver_gender".to_string(), CellValue::Text("female".to_string()))],
            vec![("driver_gender".to_string(), CellValue::Null)],
        ]);

        let chart = build_chart_data(&snapshot, ChartDimension::DriverGender);

        assert_eq!(chart.total(), 1);
        assert_eq!(chart.counts[0].value, "female");
    }

    #[test]
    fn ties_are_ordered_by_value() {
        let counts = frequency_counts(&[
            CellValue::Text("b".to_string()),
            CellValue::Text("a".to_string()),
            CellValue::Text("c".to_string()),
            CellValue::Text("c".to_string()),
        ]);

        let values: Vec<&str> = counts.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["c", "a", "b"]);
    }

    #[test]
    fn integer_flags_count_as_text_values() {
        let column = Column {
            name: "violation".to_string(),
            values: vec![CellValue::Int(1), CellValue::Int(1), CellValue::Int(0)],
        };
        let counts = frequency_counts(&column.values);
        assert_eq!(
            counts,
            vec![
                FrequencyCount {
                    value: "1".to_string(),
                    count: 2
                },
                FrequencyCount {
                    value: "0".to_string(),
                    count: 1
                },
            ]
        );
    }
}
