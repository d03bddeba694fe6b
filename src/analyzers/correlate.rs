//! Pairwise-complete Pearson correlation over the line columns.

use crate::analyzers::types::CorrelationMatrix;
use crate::error::EngineError;
use crate::table::{Line, NormalizedTable};

/// Minimum valid observations for a column to be correlatable at all.
const MIN_OBSERVATIONS: usize = 2;

/// Computes the correlation matrix for the requested lines.
///
/// Each pair is computed over the rows where both lines report a count
/// (pairwise-complete observations); a row missing one line still
/// contributes to every pair it does complete. The result is symmetric
/// with 1.0 on the diagonal, ordered exactly as `lines`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyColumn`] if any requested line has fewer
/// than 2 valid values in the whole table.
pub fn correlation_matrix(
    table: &NormalizedTable,
    lines: &[Line],
) -> Result<CorrelationMatrix, EngineError> {
    for &line in lines {
        let valid = table
            .rows()
            .iter()
            .filter(|row| row.value(line).is_some())
            .count();
        if valid < MIN_OBSERVATIONS {
            return Err(EngineError::EmptyColumn(line.as_str().to_string()));
        }
    }

    let n = lines.len();
    let mut values = vec![vec![1.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let r = pairwise_pearson(table, lines[i], lines[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        lines: lines.to_vec(),
        values,
    })
}

/// Pearson coefficient over the rows where both lines report a count.
/// Under-determined pairs (fewer than 2 shared rows, or zero variance on
/// either side) come out as NaN.
fn pairwise_pearson(table: &NormalizedTable, a: Line, b: Line) -> f64 {
    let pairs: Vec<(f64, f64)> = table
        .rows()
        .iter()
        .filter_map(|row| match (row.value(a), row.value(b)) {
            (Some(x), Some(y)) => Some((x as f64, y as f64)),
            _ => None,
        })
        .collect();

    if pairs.len() < MIN_OBSERVATIONS {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    covariance / (variance_a.sqrt() * variance_b.sqrt())
}
