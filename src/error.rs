use thiserror::Error;

/// Errors surfaced by the aggregation engine.
///
/// All failures are synchronous and carry enough context (row index or
/// column name) for a human to fix the input. Nothing is retried or
/// silently repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A row's date field was missing or not in `YYYY-MM-DD` form.
    #[error("row {row}: cannot parse date {value:?}")]
    DateParse { row: usize, value: String },

    /// A selected column name is outside the known line vocabulary.
    #[error("unknown line identifier {0:?}")]
    UnknownColumn(String),

    /// Statistics were requested over a column with too few usable values.
    #[error("column {0:?} has no usable values")]
    EmptyColumn(String),

    /// The input table had zero rows.
    #[error("input table has no rows")]
    EmptyTable,
}
