use crate::field::FieldKind;
use thiserror::Error;

/// Errors raised while parsing an expression.
///
/// Every variant is produced during parsing only. Evaluation of a parsed
/// [`Expression`](crate::Expression) never fails: an exhausted search is
/// reported as `None`, not as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// Token does not conform to the field's grammar.
    #[error("{field} field: unrecognized token {token:?}")]
    Syntax {
        /// Field the token was found in.
        field: FieldKind,
        /// The offending token.
        token: String,
    },
    /// Numeric value outside the field's valid domain.
    #[error("{field} field: value {token:?} is out of the {min}-{max} range")]
    Domain {
        /// Field the value was found in.
        field: FieldKind,
        /// The offending token.
        token: String,
        /// Smallest legal value of the field.
        min: u16,
        /// Largest legal value of the field.
        max: u16,
    },
    /// Range with inverted bounds, like `20-10`.
    #[error("{field} field: invalid range {token:?}")]
    InvalidRange {
        /// Field the range was found in.
        field: FieldKind,
        /// The offending token.
        token: String,
    },
    /// Step with a zero or unparseable increment, like `*/0`.
    #[error("{field} field: invalid step {token:?}")]
    InvalidStep {
        /// Field the step was found in.
        field: FieldKind,
        /// The offending token.
        token: String,
    },
    /// Nth-weekday ordinal outside 1-5, like `2#6`.
    #[error("day-of-week field: ordinal in {token:?} must be within 1-5")]
    InvalidOrdinal {
        /// The offending token.
        token: String,
    },
    /// Symbolic token (`*`, `?`, `L`, `W`, `#`) used inside a list.
    #[error("{field} field: {token:?} cannot be combined with other list items")]
    UnsupportedCombination {
        /// Field the list was found in.
        field: FieldKind,
        /// The offending list item.
        token: String,
    },
    /// Expression does not consist of exactly six fields.
    #[error("expected 6 fields, found {found}")]
    FieldCount {
        /// Number of whitespace-separated fields found.
        found: usize,
    },
    /// Day-of-month and day-of-week are mutually exclusive selectors.
    #[error("exactly one of day-of-month and day-of-week must be '?'")]
    DayFieldConflict,
    /// Year value outside the configured horizon.
    #[error("year value {token:?} is outside the {min}-{max} horizon")]
    YearRange {
        /// The offending token.
        token: String,
        /// First year of the horizon.
        min: u16,
        /// Last year of the horizon.
        max: u16,
    },
}
