//! Output shapes produced by the aggregation engine.
//!
//! Every view is freshly owned: nothing here borrows from or aliases the
//! normalized table it was computed from.

use chrono::NaiveDate;
use serde::Serialize;

use crate::table::Line;

/// Weekday/weekend tag for a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

/// Pairwise Pearson correlations over a set of lines.
///
/// Symmetric with a unit diagonal; row and column order is the order the
/// lines were requested in.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub lines: Vec<Line>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// The coefficient for a pair of lines, if both were requested.
    pub fn get(&self, a: Line, b: Line) -> Option<f64> {
        let i = self.lines.iter().position(|&l| l == a)?;
        let j = self.lines.iter().position(|&l| l == b)?;
        Some(self.values[i][j])
    }
}

/// A normalized row plus the derived all-lines total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotaledRow {
    pub date: NaiveDate,
    pub counts: [Option<u64>; 12],
    pub total: u64,
}

/// Mean ridership for one calendar month. `average` is `None` when the
/// month had no valid observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month: &'static str,
    pub average: Option<f64>,
}

/// Mean ridership for one weekday, Monday-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub day: &'static str,
    pub average: Option<f64>,
}

/// One (date, ridership) point of a per-line time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: u64,
}

/// An observation tagged with its weekday/weekend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaggedObservation {
    pub date: NaiveDate,
    pub value: u64,
    pub day_type: DayType,
}

/// Box-plot statistics with 1.5x IQR outlier fences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub outlier_lower_bound: f64,
    pub outlier_upper_bound: f64,
}

impl SummaryStatistics {
    /// Whether a value falls outside the 1.5x IQR fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.outlier_lower_bound || value > self.outlier_upper_bound
    }
}

/// Every per-line view the dashboard renders for one selected line.
#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    pub line: Line,
    pub monthly: Vec<MonthlyAverage>,
    pub daily: Vec<DailyAverage>,
    pub over_time: Vec<Observation>,
    pub day_types: Vec<TaggedObservation>,
    pub distribution: SummaryStatistics,
}
