//! Box-plot summary statistics for a selected line's counts.

use crate::analyzers::types::SummaryStatistics;
use crate::analyzers::utility::quantile;
use crate::error::EngineError;
use crate::table::Line;

/// Multiplier on the interquartile range for the outlier fences.
const IQR_FENCE: f64 = 1.5;

/// Standard box-plot statistics over a line's null-filtered counts.
///
/// Quartiles use linear interpolation on the sorted sample; the fences
/// are `q1 - 1.5*IQR` and `q3 + 1.5*IQR`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyColumn`] naming `line` when `values` is
/// empty.
pub fn summary_statistics(line: Line, values: &[u64]) -> Result<SummaryStatistics, EngineError> {
    if values.is_empty() {
        return Err(EngineError::EmptyColumn(line.as_str().to_string()));
    }

    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;

    Ok(SummaryStatistics {
        min: sorted[0],
        q1,
        median: quantile(&sorted, 0.5),
        q3,
        max: sorted[sorted.len() - 1],
        outlier_lower_bound: q1 - IQR_FENCE * iqr,
        outlier_upper_bound: q3 + IQR_FENCE * iqr,
    })
}
