use crate::{
    calendar::{Gregorian, Moment},
    field::{Field, FieldKind, FieldSpec},
    occurrence, Error, Result,
};
use chrono::{DateTime, TimeDelta, TimeZone, Timelike};
use std::{fmt::Display, str::FromStr};

/// First year accepted and searched by default.
pub const DEFAULT_MIN_YEAR: u16 = 1970;
/// Last year accepted and searched by default, matching the AWS scheduler.
pub const DEFAULT_MAX_YEAR: u16 = 2199;

/// Year range accepted by the year field and searched by the evaluator.
///
/// Searches that exhaust the horizon report "no occurrence" rather than
/// looping, which is what bounds the evaluation of unsatisfiable
/// expressions like `0 0 31 2 ? *`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Horizon {
    /// First year of the range, inclusive.
    pub min_year: u16,
    /// Last year of the range, inclusive.
    pub max_year: u16,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

/// Which of the two day fields selects days; the other one is `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DaySelector {
    ByDayOfMonth,
    ByDayOfWeek,
}

/// A parsed, validated AWS cron expression.
///
/// Immutable once constructed and freely shareable across threads; every
/// evaluation is an independent pure computation.
///
/// For the expression format and usage examples, please refer to the
/// [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Expression {
    minutes: Field,
    hours: Field,
    day_of_month: Field,
    months: Field,
    day_of_week: Field,
    years: Field,
    selector: DaySelector,
    horizon: Horizon,
}

impl Expression {
    /// Parses and validates `pattern` under the default [`Horizon`].
    ///
    /// Returns an [`Error`] when the pattern is unparseable, a value is out
    /// of its field's domain, or the day fields conflict.
    pub fn parse(pattern: impl AsRef<str>) -> Result<Self> {
        Self::parse_with_horizon(pattern, Horizon::default())
    }

    /// Parses and validates `pattern`, accepting years within `horizon`.
    pub fn parse_with_horizon(pattern: impl AsRef<str>, horizon: Horizon) -> Result<Self> {
        let fields: Vec<&str> = pattern.as_ref().split_whitespace().collect();
        if fields.len() != 6 {
            return Err(Error::FieldCount { found: fields.len() });
        }

        let expression = Self {
            minutes: Field::parse(FieldKind::Minutes, fields[0], horizon)?,
            hours: Field::parse(FieldKind::Hours, fields[1], horizon)?,
            day_of_month: Field::parse(FieldKind::DayOfMonth, fields[2], horizon)?,
            months: Field::parse(FieldKind::Months, fields[3], horizon)?,
            day_of_week: Field::parse(FieldKind::DayOfWeek, fields[4], horizon)?,
            years: Field::parse(FieldKind::Years, fields[5], horizon)?,
            selector: DaySelector::ByDayOfMonth,
            horizon,
        };

        // The day fields are mutually exclusive selectors: exactly one of
        // them must be `?`.
        let selector = match (expression.day_of_month.spec(), expression.day_of_week.spec()) {
            (FieldSpec::Any, FieldSpec::Any) => return Err(Error::DayFieldConflict),
            (FieldSpec::Any, _) => DaySelector::ByDayOfWeek,
            (_, FieldSpec::Any) => DaySelector::ByDayOfMonth,
            (_, _) => return Err(Error::DayFieldConflict),
        };

        Ok(Self { selector, ..expression })
    }

    /// Next occurrence strictly after `reference`, at minute resolution.
    ///
    /// The reference is truncated to the whole minute and advanced by one
    /// minute before the search, so an instant is never its own successor.
    ///
    /// Returns `None` when no occurrence exists up to the horizon.
    pub fn next<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let start = truncate_to_minute(reference)?.checked_add_signed(TimeDelta::minutes(1))?;
        let start = Moment::from_datetime(&start)?;
        occurrence::next_occurrence(self, &Gregorian, start)?.into_datetime(&reference.timezone())
    }

    /// Previous occurrence strictly before `reference`; mirror of [`next`](Self::next).
    ///
    /// Returns `None` when no occurrence exists back to the horizon.
    pub fn previous<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let start = truncate_to_minute(reference)?.checked_sub_signed(TimeDelta::minutes(1))?;
        let start = Moment::from_datetime(&start)?;
        occurrence::previous_occurrence(self, &Gregorian, start)?.into_datetime(&reference.timezone())
    }

    /// `true` if `instant` satisfies the expression, ignoring sub-minute
    /// components. A direct predicate check, no search involved.
    pub fn matches<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        Moment::from_datetime(instant).is_some_and(|at| occurrence::matches(self, &Gregorian, at))
    }

    /// Iterator of occurrences strictly after `reference`, in ascending order.
    pub fn iter<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        Occurrences {
            expression: self.clone(),
            cursor: Some(reference.clone()),
        }
    }

    /// Iterator of occurrences strictly before `reference`, in descending order.
    pub fn iter_previous<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        OccurrencesBack {
            expression: self.clone(),
            cursor: Some(reference.clone()),
        }
    }

    /// The year horizon this expression was parsed under.
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub(crate) fn minutes(&self) -> &Field {
        &self.minutes
    }

    pub(crate) fn hours(&self) -> &Field {
        &self.hours
    }

    pub(crate) fn day_of_month(&self) -> &Field {
        &self.day_of_month
    }

    pub(crate) fn months(&self) -> &Field {
        &self.months
    }

    pub(crate) fn day_of_week(&self) -> &Field {
        &self.day_of_week
    }

    pub(crate) fn years(&self) -> &Field {
        &self.years
    }

    pub(crate) fn day_selector(&self) -> DaySelector {
        self.selector
    }
}

/// Zeroes the sub-minute components of a timestamp.
fn truncate_to_minute<Tz: TimeZone>(value: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    value.with_nanosecond(0)?.with_second(0)
}

/// Forward iterator state.
#[derive(Debug, Clone)]
struct Occurrences<Tz: TimeZone> {
    expression: Expression,
    cursor: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Iterator for Occurrences<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        let found = self.expression.next(&cursor)?;
        self.cursor = Some(found.clone());
        Some(found)
    }
}

/// Backward iterator state.
#[derive(Debug, Clone)]
struct OccurrencesBack<Tz: TimeZone> {
    expression: Expression,
    cursor: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Iterator for OccurrencesBack<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        let found = self.expression.previous(&cursor)?;
        self.cursor = Some(found.clone());
        Some(found)
    }
}

impl From<Expression> for String {
    fn from(value: Expression) -> Self {
        value.to_string()
    }
}

impl From<&Expression> for String {
    fn from(value: &Expression) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Expression {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&String> for Expression {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Expression {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.minutes, self.hours, self.day_of_month, self.months, self.day_of_week, self.years
        )
    }
}
