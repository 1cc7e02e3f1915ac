use thiserror::Error;

/// Errors surfaced by the stats/scale engine and the typed data layer.
///
/// These are contract violations reported synchronously to the caller;
/// nothing here is retried or recovered from inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("cannot summarize an empty group")]
    InsufficientData,

    #[error("category '{0}' is not in the scale domain")]
    UnknownCategory(String),

    #[error("degenerate domain: min and max are both {0}")]
    DegenerateDomain(f64),

    #[error("date '{text}' does not match pattern '{pattern}'")]
    DateParse { text: String, pattern: String },

    #[error("column '{0}' not found in header")]
    MissingColumn(String),

    #[error("value '{value}' in column '{column}' is not numeric")]
    InvalidNumber { column: String, value: String },

    #[error("column '{column}' was not coerced to {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
}
