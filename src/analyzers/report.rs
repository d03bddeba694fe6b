//! Per-line report assembly.

use crate::analyzers::aggregate::{
    daily_average, day_type_projection, filtered_projection, monthly_average,
};
use crate::analyzers::summary::summary_statistics;
use crate::analyzers::types::LineReport;
use crate::error::EngineError;
use crate::table::{Line, NormalizedTable};

/// Computes every per-line view the dashboard renders for one selected
/// line: monthly and daily averages, the time series, the weekday/weekend
/// tagging, and the distribution statistics.
///
/// # Errors
///
/// Returns [`EngineError::EmptyColumn`] when the line has no valid counts
/// at all.
pub fn line_report(table: &NormalizedTable, line: Line) -> Result<LineReport, EngineError> {
    let over_time = filtered_projection(table, line);
    let values: Vec<u64> = over_time.iter().map(|point| point.value).collect();
    let distribution = summary_statistics(line, &values)?;

    Ok(LineReport {
        line,
        monthly: monthly_average(table, line),
        daily: daily_average(table, line),
        day_types: day_type_projection(table, line),
        over_time,
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RawRecord;

    #[test]
    fn test_line_report_bundles_all_views() {
        let table = NormalizedTable::normalize(vec![
            RawRecord {
                date: "2024-01-01".to_string(),
                bus_rkl: Some(100),
                ..Default::default()
            },
            RawRecord {
                date: "2024-01-06".to_string(),
                bus_rkl: Some(60),
                ..Default::default()
            },
        ])
        .unwrap();

        let report = line_report(&table, Line::BusRkl).unwrap();

        assert_eq!(report.line, Line::BusRkl);
        assert_eq!(report.monthly.len(), 12);
        assert_eq!(report.daily.len(), 7);
        assert_eq!(report.over_time.len(), 2);
        assert_eq!(report.day_types.len(), 2);
        assert_eq!(report.distribution.min, 60.0);
        assert_eq!(report.distribution.max, 100.0);
    }

    #[test]
    fn test_line_report_fails_on_all_null_line() {
        let table = NormalizedTable::normalize(vec![RawRecord {
            date: "2024-01-01".to_string(),
            bus_rkl: Some(100),
            ..Default::default()
        }])
        .unwrap();

        let err = line_report(&table, Line::RailTebrau).unwrap_err();
        assert_eq!(err, EngineError::EmptyColumn("rail_tebrau".to_string()));
    }
}
