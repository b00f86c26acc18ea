use thiserror::Error;

/// Errors raised while validating a weather table before any computation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("input columns [{}] do not match the required columns [{}]", actual.join(", "), expected.join(", "))]
    ColumnMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("column {name} has {actual} values but the time index has {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("weather series must contain at least one timestep")]
    EmptySeries,
    #[error("time index must be strictly increasing at one-hour steps; offending entry at position {position}")]
    IrregularTimeIndex { position: usize },
}
