//! Grouped averages, totals, and per-line projections.
//!
//! Null handling is uniform: missing counts are skipped when averaging,
//! counted as 0 when summing the all-lines total, and dropped from
//! per-line projections.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::analyzers::types::{
    DailyAverage, DayType, MonthlyAverage, Observation, TaggedObservation, TotaledRow,
};
use crate::analyzers::utility::mean;
use crate::table::{Line, NormalizedTable};

/// Calendar month names, January first. Chart axes read left-to-right by
/// year progression, so grouped output is ordered by month number, never
/// by group-key sort order.
static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names in ISO order, Monday first.
static DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Adds the derived all-lines total to every row.
///
/// Missing counts contribute 0 to the sum only; the originals are carried
/// over untouched. Row order is preserved.
pub fn with_total(table: &NormalizedTable) -> Vec<TotaledRow> {
    table
        .rows()
        .iter()
        .map(|row| TotaledRow {
            date: row.date,
            counts: *row.counts(),
            total: row.counts().iter().flatten().sum(),
        })
        .collect()
}

/// Mean ridership of `line` per calendar month, January through December.
///
/// Always 12 entries; months with no valid observations yield
/// `average: None`.
pub fn monthly_average(table: &NormalizedTable, line: Line) -> Vec<MonthlyAverage> {
    let mut buckets: [Vec<f64>; 12] = Default::default();
    for row in table.rows() {
        if let Some(value) = row.value(line) {
            buckets[row.date.month0() as usize].push(value as f64);
        }
    }

    buckets
        .iter()
        .enumerate()
        .map(|(index, values)| MonthlyAverage {
            month: MONTH_NAMES[index],
            average: mean(values),
        })
        .collect()
}

/// Mean ridership of `line` per weekday, Monday through Sunday.
///
/// Always 7 entries; same null policy as [`monthly_average`].
pub fn daily_average(table: &NormalizedTable, line: Line) -> Vec<DailyAverage> {
    let mut buckets: [Vec<f64>; 7] = Default::default();
    for row in table.rows() {
        if let Some(value) = row.value(line) {
            buckets[row.date.weekday().num_days_from_monday() as usize].push(value as f64);
        }
    }

    buckets
        .iter()
        .enumerate()
        .map(|(index, values)| DailyAverage {
            day: DAY_NAMES[index],
            average: mean(values),
        })
        .collect()
}

/// Saturday and Sunday are [`DayType::Weekend`], everything else
/// [`DayType::Weekday`].
pub fn classify_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ => DayType::Weekday,
    }
}

/// Date plus the selected line's count, rows without a count dropped,
/// sorted chronologically.
///
/// The stable sort restores date order when input rows arrived shuffled;
/// same-date rows keep their input order.
pub fn filtered_projection(table: &NormalizedTable, line: Line) -> Vec<Observation> {
    let mut points: Vec<Observation> = table
        .rows()
        .iter()
        .filter_map(|row| {
            row.value(line).map(|value| Observation {
                date: row.date,
                value,
            })
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

/// The filtered projection with each observation tagged weekday/weekend,
/// feeding the weekend-vs-weekday comparison chart.
pub fn day_type_projection(table: &NormalizedTable, line: Line) -> Vec<TaggedObservation> {
    filtered_projection(table, line)
        .into_iter()
        .map(|point| TaggedObservation {
            date: point.date,
            value: point.value,
            day_type: classify_day_type(point.date),
        })
        .collect()
}
