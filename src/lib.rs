//! AWS cron expression parser and occurrence calculator.
#![deny(unsafe_code, missing_docs)]

//! This crate parses the six-field cron expressions used by AWS schedulers
//! and computes the concrete timestamps satisfying them:
//! - parse and validate an expression once, reuse it for many evaluations;
//! - find the next or previous occurrence relative to any reference instant;
//! - iterate occurrence series in either direction;
//! - check a single instant against an expression without searching.
//!
//! _This is not a job scheduler or runner_, only the expression engine such a
//! scheduler would be built on.
//!
//! ## Expression format
//!
//! An expression consists of exactly six whitespace-separated fields:
//! minutes, hours, day-of-month, month, day-of-week and year. There is no
//! seconds field; occurrences have minute resolution.
//!
//! | Field        | Allowed values    | Allowed special characters |
//! |--------------|-------------------|----------------------------|
//! | Minutes      | 0-59              | * , - /                    |
//! | Hours        | 0-23              | * , - /                    |
//! | Day of month | 1-31              | * , - / ? L W              |
//! | Month        | 1-12 or JAN-DEC   | * , - /                    |
//! | Day of week  | 1-7 or MON-SUN    | * , - / ? L #              |
//! | Year         | 1970-2199         | * , - /                    |
//!
//! Day-of-week values are numbered `1` = Monday through `7` = Sunday; month
//! and weekday names are case-insensitive.
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values, ranges or steps, i.e. `1,7,12`, `SAT,SUN`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`, `30-59/2`;
//! - `L` - last day of the month (`L`, or `L-3` for three days before it) in
//!   the day-of-month field, or last particular weekday of the month (`5L`)
//!   in the day-of-week field;
//! - `W` - the weekday (Monday to Friday) nearest to the given day of month
//!   within the same month, i.e. `15W`, or `LW` for the nearest weekday to
//!   the month's last day;
//! - `#` - the n-th weekday of the month, i.e. `FRI#1`, `2#3`;
//! - `?` - the unused day field: day-of-month and day-of-week are mutually
//!   exclusive selectors, and exactly one of them must be `?`.
//!
//! ## How to use
//!
//! The single entry point is [`Expression`]:
//! - [`parse()`](Expression::parse) validates the expression text;
//! - [`next()`](Expression::next) / [`previous()`](Expression::previous)
//!   return the nearest occurrence in either direction, or `None` when the
//!   search exhausts the year [`Horizon`];
//! - [`iter()`](Expression::iter) / [`iter_previous()`](Expression::iter_previous)
//!   produce occurrence series;
//! - [`matches()`](Expression::matches) checks one instant directly.
//!
//! ### Example with `next`
//! ```rust
//! use aws_cron::Expression;
//! use chrono::DateTime;
//!
//! let expression = Expression::parse("0 12 ? * MON-FRI *")?;
//! let reference = DateTime::parse_from_rfc3339("2024-01-06T00:00:00Z")?;
//!
//! // The reference is a Saturday, so the next occurrence is Monday noon.
//! let next = expression.next(&reference);
//! assert_eq!(next.unwrap().to_rfc3339(), "2024-01-08T12:00:00+00:00");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use aws_cron::Expression;
//! use chrono::DateTime;
//!
//! let expression = Expression::parse("0/23 * * * ? *")?;
//! let reference = DateTime::parse_from_rfc3339("2021-08-07T08:30:57Z")?;
//!
//! let occurrences: Vec<String> = expression
//!     .iter(&reference)
//!     .take(3)
//!     .map(|t| t.to_rfc3339())
//!     .collect();
//! assert_eq!(
//!     occurrences,
//!     [
//!         "2021-08-07T08:46:00+00:00",
//!         "2021-08-07T09:00:00+00:00",
//!         "2021-08-07T09:23:00+00:00",
//!     ]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Example with `matches`
//! ```rust
//! use aws_cron::Expression;
//! use chrono::DateTime;
//!
//! let expression = Expression::parse("0 0 L * ? *")?;
//!
//! assert!(expression.matches(&DateTime::parse_from_rfc3339("2024-02-29T00:00:00Z")?));
//! assert!(!expression.matches(&DateTime::parse_from_rfc3339("2024-02-28T00:00:00Z")?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Evaluation operates in whatever timezone the provided
//! [`DateTime`](chrono::DateTime) already carries; no timezone conversion is
//! performed.
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html)
//!   and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html)
//!   implementations for [`Expression`], using its canonical string form.

/// Calendar facts consumed by the occurrence search.
pub mod calendar;
/// Crate specific Error implementation.
pub mod error;
/// Cron expression parser and occurrence calculator.
pub mod expression;
mod field;
mod occurrence;

// Re-export of public entities.
pub use calendar::{Calendar, Gregorian};
pub use error::Error;
pub use expression::{Expression, Horizon, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
pub use field::FieldKind;

/// Convenient alias for `Result`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
