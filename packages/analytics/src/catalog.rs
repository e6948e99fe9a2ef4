//! The fixed report catalog.
//!
//! Two menus of named, parameterless queries against `police_check`,
//! written for `PostgreSQL`. Menu order is the order of the arrays below.
//! Outcome matching uses `ILIKE` where the reports look for arrests by
//! substring, so `Arrest` and `arrest` both count. Ranked reports carry a
//! secondary sort key so repeated runs over unchanged data return rows in
//! the same order. Rates and averages are returned as `float8`.

use securecheck_analytics_models::{ReportDefinition, ReportTier};

use crate::AnalyticsError;

/// Loads the whole table for the overview, charts, and prediction.
pub const FULL_TABLE_QUERY: &str = "SELECT * FROM police_check";

static ADVANCED_REPORTS: &[ReportDefinition] = &[
    ReportDefinition {
        name: "Top 10 vehicle_Number involved in drug-related stops",
        sql: "SELECT vehicle_number, COUNT(*) AS drug_related_count \
              FROM police_check \
              WHERE drugs_stop = TRUE \
              GROUP BY vehicle_number \
              ORDER BY drug_related_count DESC, vehicle_number \
              LIMIT 10",
    },
    ReportDefinition {
        name: "Vehicles were most frequently searched",
        sql: "SELECT vehicle_number, COUNT(*) AS search_count \
              FROM police_check \
              WHERE search_conducted = TRUE \
              GROUP BY vehicle_number \
              ORDER BY search_count DESC, vehicle_number \
              LIMIT 10",
    },
    ReportDefinition {
        name: "Driver age group had the highest arrest rate",
        sql: "SELECT CASE \
                  WHEN driver_age < 18 THEN '<18' \
                  WHEN driver_age BETWEEN 18 AND 25 THEN '18-25' \
                  WHEN driver_age BETWEEN 26 AND 40 THEN '26-40' \
                  WHEN driver_age BETWEEN 41 AND 60 THEN '41-60' \
                  ELSE '60+' END AS age_group, \
              SUM(CASE WHEN stop_outcome ILIKE '%arrest%' THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS arrest_rate \
              FROM police_check \
              GROUP BY age_group \
              ORDER BY arrest_rate DESC, age_group",
    },
    ReportDefinition {
        name: "Gender distribution of drivers stopped in each country",
        sql: "SELECT country_name, driver_gender, COUNT(*) AS count \
              FROM police_check \
              GROUP BY country_name, driver_gender \
              ORDER BY country_name, driver_gender",
    },
    ReportDefinition {
        name: "Race and gender combination has the highest search rate",
        sql: "SELECT driver_race, driver_gender, \
              SUM(CASE WHEN search_conducted = TRUE THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS search_rate \
              FROM police_check \
              GROUP BY driver_race, driver_gender \
              ORDER BY search_rate DESC, driver_race, driver_gender \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Time of day sees the most traffic stops",
        sql: "SELECT EXTRACT(HOUR FROM stop_time::time)::int AS hour, COUNT(*) AS count \
              FROM police_check \
              GROUP BY hour \
              ORDER BY count DESC, hour \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Average stop duration for different violations",
        sql: "SELECT violation, \
              AVG(CAST(SUBSTRING(stop_duration FROM '^[0-9]+') AS NUMERIC))::float8 AS avg_duration \
              FROM police_check \
              GROUP BY violation \
              ORDER BY violation",
    },
    ReportDefinition {
        name: "Stops during the night more likely to lead to arrests",
        sql: "SELECT CASE \
                  WHEN EXTRACT(HOUR FROM stop_time::time) BETWEEN 20 AND 23 \
                    OR EXTRACT(HOUR FROM stop_time::time) BETWEEN 0 AND 4 THEN 'Night' \
                  ELSE 'Day' END AS time_period, \
              SUM(CASE WHEN stop_outcome ILIKE '%arrest%' THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS arrest_rate \
              FROM police_check \
              GROUP BY time_period \
              ORDER BY time_period \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Violations are most associated with searches or arrests",
        sql: "SELECT violation, \
              SUM(CASE WHEN search_conducted = TRUE OR stop_outcome ILIKE '%arrest%' THEN 1 ELSE 0 END) AS count \
              FROM police_check \
              GROUP BY violation \
              ORDER BY count DESC, violation \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Violations are most common among younger drivers (<25)",
        sql: "SELECT violation, COUNT(*) AS count \
              FROM police_check \
              WHERE driver_age < 25 \
              GROUP BY violation \
              ORDER BY count DESC, violation \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Is there a violation that rarely results in search or arrest",
        sql: "SELECT violation, \
              SUM(CASE WHEN search_conducted = TRUE OR stop_outcome ILIKE '%arrest%' THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS rate \
              FROM police_check \
              GROUP BY violation \
              ORDER BY rate ASC, violation \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Which countries report the highest rate of drug-related stops",
        sql: "SELECT country_name, \
              SUM(CASE WHEN drugs_stop = TRUE THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS drug_rate \
              FROM police_check \
              GROUP BY country_name \
              ORDER BY drug_rate DESC, country_name \
              LIMIT 5",
    },
    ReportDefinition {
        name: "What is the arrest rate by country and violation",
        sql: "SELECT country_name, violation, \
              SUM(CASE WHEN stop_outcome ILIKE '%arrest%' THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS arrest_rate \
              FROM police_check \
              GROUP BY country_name, violation \
              ORDER BY arrest_rate DESC, country_name, violation \
              LIMIT 5",
    },
    ReportDefinition {
        name: "Which country has the most stops with search conducted",
        sql: "SELECT country_name, COUNT(*) AS search_count \
              FROM police_check \
              WHERE search_conducted = TRUE \
              GROUP BY country_name \
              ORDER BY search_count DESC, country_name \
              LIMIT 5",
    },
];

static COMPLEX_REPORTS: &[ReportDefinition] = &[
    ReportDefinition {
        name: "Yearly Breakdown of Stops and Arrests by Country",
        sql: "SELECT country_name, stop_year, total_stops, total_arrests, \
              ROUND(total_arrests * 100.0 / total_stops, 2)::float8 AS arrest_rate_percent, \
              SUM(total_stops) OVER (PARTITION BY country_name ORDER BY stop_year)::bigint AS cumulative_stops, \
              SUM(total_arrests) OVER (PARTITION BY country_name ORDER BY stop_year)::bigint AS cumulative_arrests \
              FROM ( \
                  SELECT country_name, EXTRACT(YEAR FROM stop_date::date)::int AS stop_year, \
                  COUNT(*) AS total_stops, \
                  SUM(CASE WHEN stop_outcome = 'Arrest' THEN 1 ELSE 0 END) AS total_arrests \
                  FROM police_check \
                  GROUP BY country_name, stop_year \
              ) AS yearly_stats \
              ORDER BY country_name, stop_year",
    },
    ReportDefinition {
        name: "Driver Violation Trends Based on Age and Race",
        sql: "SELECT v.driver_race, v.age_group, v.total_violations, \
              COALESCE(s.total_searches, 0) AS total_searches, \
              ROUND(COALESCE(s.total_searches, 0) * 100.0 / v.total_violations, 2)::float8 AS search_rate_percentage \
              FROM ( \
                  SELECT driver_race, CASE \
                      WHEN driver_age < 25 THEN '<25' \
                      WHEN driver_age BETWEEN 25 AND 34 THEN '25-34' \
                      WHEN driver_age BETWEEN 35 AND 44 THEN '35-44' \
                      WHEN driver_age BETWEEN 45 AND 54 THEN '45-54' \
                      ELSE '55+' END AS age_group, \
                  COUNT(*) AS total_violations \
                  FROM police_check \
                  GROUP BY driver_race, age_group \
              ) v \
              LEFT JOIN ( \
                  SELECT driver_race, CASE \
                      WHEN driver_age < 25 THEN '<25' \
                      WHEN driver_age BETWEEN 25 AND 34 THEN '25-34' \
                      WHEN driver_age BETWEEN 35 AND 44 THEN '35-44' \
                      WHEN driver_age BETWEEN 45 AND 54 THEN '45-54' \
                      ELSE '55+' END AS age_group, \
                  COUNT(*) AS total_searches \
                  FROM police_check \
                  WHERE search_conducted = TRUE \
                  GROUP BY driver_race, age_group \
              ) s ON v.driver_race = s.driver_race AND v.age_group = s.age_group \
              ORDER BY v.driver_race, v.age_group",
    },
    ReportDefinition {
        name: "Time Period Analysis of Stops, Number of Stops by Year,Month, Hour of the Day",
        sql: "SELECT EXTRACT(YEAR FROM \"timestamp\"::timestamp)::int AS stop_year, \
              EXTRACT(MONTH FROM \"timestamp\"::timestamp)::int AS stop_month, \
              EXTRACT(HOUR FROM \"timestamp\"::timestamp)::int AS stop_hour, \
              COUNT(*) AS number_of_stops \
              FROM police_check \
              GROUP BY stop_year, stop_month, stop_hour \
              ORDER BY stop_year, stop_month, stop_hour",
    },
    ReportDefinition {
        name: "Violations with High Search and Arrest Rates",
        sql: "SELECT violation, \
              SUM(CASE WHEN search_conducted = TRUE THEN 1 ELSE 0 END) AS high_search, \
              SUM(CASE WHEN stop_outcome = 'Arrest' THEN 1 ELSE 0 END) AS total_arrests, \
              RANK() OVER (ORDER BY SUM(CASE WHEN search_conducted = TRUE THEN 1 ELSE 0 END) DESC) AS highsearch_rank, \
              RANK() OVER (ORDER BY SUM(CASE WHEN stop_outcome = 'Arrest' THEN 1 ELSE 0 END) DESC) AS arrest_rates \
              FROM police_check \
              GROUP BY violation \
              ORDER BY highsearch_rank, violation",
    },
    ReportDefinition {
        name: "Driver Demographics by Country",
        sql: "SELECT country_name, driver_gender, driver_race, CASE \
                  WHEN driver_age < 20 THEN 'Under 20' \
                  WHEN driver_age BETWEEN 20 AND 29 THEN '20-29' \
                  WHEN driver_age BETWEEN 30 AND 39 THEN '30-39' \
                  WHEN driver_age BETWEEN 40 AND 49 THEN '40-49' \
                  WHEN driver_age BETWEEN 50 AND 59 THEN '50-59' \
                  WHEN driver_age BETWEEN 60 AND 69 THEN '60-69' \
                  ELSE '70+' END AS age_group, \
              COUNT(*) AS total_drivers \
              FROM police_check \
              GROUP BY country_name, driver_gender, driver_race, age_group \
              ORDER BY country_name, driver_gender, driver_race, age_group",
    },
    ReportDefinition {
        name: "Top 5 Violations with Highest Arrest Rates",
        sql: "SELECT violation, COUNT(*) AS total_stops, \
              SUM(CASE WHEN stop_outcome = 'Arrest' THEN 1 ELSE 0 END) AS total_arrests, \
              SUM(CASE WHEN stop_outcome = 'Arrest' THEN 1 ELSE 0 END) * 100.0::float8 / COUNT(*) AS highestarrest_rate \
              FROM police_check \
              GROUP BY violation \
              ORDER BY highestarrest_rate DESC, violation \
              LIMIT 5",
    },
];

/// Returns every report in `tier`, in menu order.
#[must_use]
pub const fn definitions(tier: ReportTier) -> &'static [ReportDefinition] {
    match tier {
        ReportTier::Advanced => ADVANCED_REPORTS,
        ReportTier::Complex => COMPLEX_REPORTS,
    }
}

/// Returns the menu labels for `tier`, in menu order.
#[must_use]
pub fn report_names(tier: ReportTier) -> Vec<&'static str> {
    definitions(tier).iter().map(|r| r.name).collect()
}

/// Looks up the SQL for `name` within `tier`.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownReportName`] if `tier` has no report
/// with exactly that name.
pub fn resolve(tier: ReportTier, name: &str) -> Result<&'static str, AnalyticsError> {
    definitions(tier)
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.sql)
        .ok_or_else(|| AnalyticsError::UnknownReportName {
            tier,
            name: name.to_string(),
        })
}
