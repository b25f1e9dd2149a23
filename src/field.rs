use crate::{expression::Horizon, Error, Result};
use std::{collections::BTreeSet, fmt::Display};

/// Identifies one of the six positions of an AWS cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Minutes, 0-59.
    Minutes,
    /// Hours, 0-23.
    Hours,
    /// Day of month, 1-31.
    DayOfMonth,
    /// Month, 1-12 or `JAN`-`DEC`.
    Months,
    /// Day of week, 1-7 (Monday = 1) or `MON`-`SUN`.
    DayOfWeek,
    /// Year, bounded by the configured horizon.
    Years,
}

impl FieldKind {
    const MONTH_NAMES: [&'static str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    const DOW_NAMES: [&'static str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

    pub(crate) fn bounds(&self, horizon: Horizon) -> (u16, u16) {
        match self {
            Self::Minutes => (0, 59),
            Self::Hours => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Months => (1, 12),
            Self::DayOfWeek => (1, 7),
            Self::Years => (horizon.min_year, horizon.max_year),
        }
    }

    /// Parses a bare value: digits, or a name for the fields that have them.
    fn value(&self, input: &str, horizon: Horizon) -> Result<u16> {
        let (min, max) = self.bounds(horizon);
        if input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty() {
            if let Ok(value) = input.parse::<u16>() {
                if value < min || value > max {
                    return Err(self.domain_error(input, min, max));
                }
                return Ok(value);
            }
            return Err(self.domain_error(input, min, max));
        }

        let names: &[&str] = match self {
            Self::Months => &Self::MONTH_NAMES,
            Self::DayOfWeek => &Self::DOW_NAMES,
            _ => &[],
        };
        if let Some(position) = names.iter().position(|name| name.eq_ignore_ascii_case(input)) {
            return Ok(position as u16 + 1);
        }

        Err(Error::Syntax {
            field: *self,
            token: input.to_owned(),
        })
    }

    fn domain_error(&self, token: &str, min: u16, max: u16) -> Error {
        match self {
            Self::Years => Error::YearRange {
                token: token.to_owned(),
                min,
                max,
            },
            _ => Error::Domain {
                field: *self,
                token: token.to_owned(),
                min,
                max,
            },
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::DayOfMonth => "day-of-month",
            Self::Months => "month",
            Self::DayOfWeek => "day-of-week",
            Self::Years => "year",
        };
        write!(f, "{name}")
    }
}

/// Parsed matching rule of a single field.
///
/// Day-symbolic variants (`LastDom`, `NearestWeekday`, `LastWeekday`,
/// `LastDow`, `NthDow`) carry no derived calendar facts; the concrete day
/// they select is resolved per candidate month during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum FieldSpec {
    /// `*`
    All,
    /// `?`, day fields only
    Any,
    /// single literal
    Value(u16),
    /// `a-b`, inclusive
    Range(u16, u16),
    /// `a/b` and `*/b`: start plus multiples of `every`, up to the field max
    Step { start: u16, every: u16 },
    /// `a-b/c`
    RangeStep { lo: u16, hi: u16, every: u16 },
    /// union of a comma-separated list of literal atoms
    ValueSet(BTreeSet<u16>),
    /// `L` (offset 0) and `L-n` on day-of-month
    LastDom { offset: u16 },
    /// `dW` on day-of-month
    NearestWeekday(u16),
    /// `LW` on day-of-month
    LastWeekday,
    /// `dL` on day-of-week
    LastDow(u16),
    /// `d#n` on day-of-week
    NthDow { weekday: u16, nth: u16 },
}

impl Display for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Any => write!(f, "?"),
            Self::Value(value) => write!(f, "{value}"),
            Self::Range(lo, hi) => write!(f, "{lo}-{hi}"),
            Self::Step { start, every } => write!(f, "{start}/{every}"),
            Self::RangeStep { lo, hi, every } => write!(f, "{lo}-{hi}/{every}"),
            Self::ValueSet(values) => {
                let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
                write!(f, "{values}")
            }
            Self::LastDom { offset: 0 } => write!(f, "L"),
            Self::LastDom { offset } => write!(f, "L-{offset}"),
            Self::NearestWeekday(day) => write!(f, "{day}W"),
            Self::LastWeekday => write!(f, "LW"),
            Self::LastDow(weekday) => write!(f, "{weekday}L"),
            Self::NthDow { weekday, nth } => write!(f, "{weekday}#{nth}"),
        }
    }
}

/// A parsed field spec together with its static value bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Field {
    spec: FieldSpec,
    min: u16,
    max: u16,
}

impl Field {
    /// Parses one field's text into its validated spec.
    pub(crate) fn parse(kind: FieldKind, input: &str, horizon: Horizon) -> Result<Self> {
        let (min, max) = kind.bounds(horizon);
        if input.is_empty() {
            return Err(Error::Syntax {
                field: kind,
                token: input.to_owned(),
            });
        }

        let atoms: Vec<&str> = input.split(',').collect();
        if atoms.len() == 1 {
            let spec = Self::parse_atom(kind, atoms[0], horizon)?;
            return Ok(Self { spec, min, max });
        }

        // Multi-atom lists union plain values; symbolic atoms have no defined
        // list semantics.
        let mut union = BTreeSet::new();
        for atom in atoms {
            match Self::parse_atom(kind, atom, horizon)? {
                FieldSpec::Value(value) => {
                    union.insert(value);
                }
                FieldSpec::Range(lo, hi) => union.extend(lo..=hi),
                FieldSpec::Step { start, every } => union.extend((start..=max).step_by(every as usize)),
                FieldSpec::RangeStep { lo, hi, every } => union.extend((lo..=hi).step_by(every as usize)),
                _ => {
                    return Err(Error::UnsupportedCombination {
                        field: kind,
                        token: atom.to_owned(),
                    })
                }
            }
        }

        Ok(Self {
            spec: FieldSpec::ValueSet(union),
            min,
            max,
        })
    }

    fn parse_atom(kind: FieldKind, atom: &str, horizon: Horizon) -> Result<FieldSpec> {
        let (min, _) = kind.bounds(horizon);

        if atom == "*" {
            return Ok(FieldSpec::All);
        }
        if atom == "?" {
            if matches!(kind, FieldKind::DayOfMonth | FieldKind::DayOfWeek) {
                return Ok(FieldSpec::Any);
            }
            return Err(Error::Syntax {
                field: kind,
                token: atom.to_owned(),
            });
        }

        if kind == FieldKind::DayOfMonth {
            if atom == "L" {
                return Ok(FieldSpec::LastDom { offset: 0 });
            }
            if atom == "LW" {
                return Ok(FieldSpec::LastWeekday);
            }
            if let Some(offset) = atom.strip_prefix("L-") {
                let offset = offset.parse::<u16>().map_err(|_| Error::Syntax {
                    field: kind,
                    token: atom.to_owned(),
                })?;
                if offset > 30 {
                    return Err(Error::Domain {
                        field: kind,
                        token: atom.to_owned(),
                        min: 0,
                        max: 30,
                    });
                }
                return Ok(FieldSpec::LastDom { offset });
            }
            if let Some(day) = atom.strip_suffix('W') {
                if !day.is_empty() {
                    return Ok(FieldSpec::NearestWeekday(kind.value(day, horizon)?));
                }
            }
        }

        if kind == FieldKind::DayOfWeek {
            if let Some((weekday, nth)) = atom.split_once('#') {
                let weekday = kind.value(weekday, horizon)?;
                let nth = nth
                    .parse::<u16>()
                    .ok()
                    .filter(|nth| (1..=5).contains(nth))
                    .ok_or_else(|| Error::InvalidOrdinal { token: atom.to_owned() })?;
                return Ok(FieldSpec::NthDow { weekday, nth });
            }
            if let Some(weekday) = atom.strip_suffix('L') {
                if !weekday.is_empty() {
                    return Ok(FieldSpec::LastDow(kind.value(weekday, horizon)?));
                }
            }
        }

        if let Some((base, step)) = atom.split_once('/') {
            let every = step
                .parse::<u16>()
                .ok()
                .filter(|every| *every >= 1)
                .ok_or_else(|| Error::InvalidStep {
                    field: kind,
                    token: atom.to_owned(),
                })?;
            if base == "*" {
                return Ok(FieldSpec::Step { start: min, every });
            }
            if let Some((lo, hi)) = base.split_once('-') {
                let lo = kind.value(lo, horizon)?;
                let hi = kind.value(hi, horizon)?;
                if lo > hi {
                    return Err(Error::InvalidRange {
                        field: kind,
                        token: atom.to_owned(),
                    });
                }
                return Ok(FieldSpec::RangeStep { lo, hi, every });
            }
            return Ok(FieldSpec::Step {
                start: kind.value(base, horizon)?,
                every,
            });
        }

        if let Some((lo, hi)) = atom.split_once('-') {
            let lo = kind.value(lo, horizon)?;
            let hi = kind.value(hi, horizon)?;
            if lo > hi {
                return Err(Error::InvalidRange {
                    field: kind,
                    token: atom.to_owned(),
                });
            }
            return Ok(FieldSpec::Range(lo, hi));
        }

        Ok(FieldSpec::Value(kind.value(atom, horizon)?))
    }

    pub(crate) fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// `true` if the spec admits `value` directly.
    ///
    /// Day-symbolic specs resolve against a concrete month in `occurrence`
    /// and never reach this predicate.
    pub(crate) fn contains(&self, value: u16) -> bool {
        match &self.spec {
            FieldSpec::All | FieldSpec::Any => value >= self.min && value <= self.max,
            FieldSpec::Value(v) => value == *v,
            FieldSpec::Range(lo, hi) => (*lo..=*hi).contains(&value),
            FieldSpec::Step { start, every } => {
                value >= *start && value <= self.max && (value - start) % every == 0
            }
            FieldSpec::RangeStep { lo, hi, every } => {
                value >= *lo && value <= *hi && (value - lo) % every == 0
            }
            FieldSpec::ValueSet(values) => values.contains(&value),
            FieldSpec::LastDom { .. }
            | FieldSpec::NearestWeekday(_)
            | FieldSpec::LastWeekday
            | FieldSpec::LastDow(_)
            | FieldSpec::NthDow { .. } => unreachable!(),
        }
    }

    /// Smallest admitted value `>= from`, if any.
    pub(crate) fn next_value(&self, from: u16) -> Option<u16> {
        match &self.spec {
            FieldSpec::All | FieldSpec::Any => {
                let candidate = from.max(self.min);
                (candidate <= self.max).then_some(candidate)
            }
            FieldSpec::Value(v) => (*v >= from).then_some(*v),
            FieldSpec::Range(lo, hi) => {
                let candidate = from.max(*lo);
                (candidate <= *hi).then_some(candidate)
            }
            FieldSpec::Step { start, every } => next_in_step(*start, self.max, *every, from),
            FieldSpec::RangeStep { lo, hi, every } => next_in_step(*lo, *hi, *every, from),
            FieldSpec::ValueSet(values) => values.range(from..).next().copied(),
            _ => unreachable!(),
        }
    }

    /// Largest admitted value `<= from`, if any.
    pub(crate) fn prev_value(&self, from: u16) -> Option<u16> {
        match &self.spec {
            FieldSpec::All | FieldSpec::Any => {
                let candidate = from.min(self.max);
                (candidate >= self.min).then_some(candidate)
            }
            FieldSpec::Value(v) => (*v <= from).then_some(*v),
            FieldSpec::Range(lo, hi) => {
                let candidate = from.min(*hi);
                (candidate >= *lo).then_some(candidate)
            }
            FieldSpec::Step { start, every } => prev_in_step(*start, self.max, *every, from),
            FieldSpec::RangeStep { lo, hi, every } => prev_in_step(*lo, *hi, *every, from),
            FieldSpec::ValueSet(values) => values.range(..=from).next_back().copied(),
            _ => unreachable!(),
        }
    }
}

fn next_in_step(start: u16, end: u16, every: u16, from: u16) -> Option<u16> {
    if from <= start {
        return (start <= end).then_some(start);
    }
    let steps = (from - start).div_ceil(every) as u32;
    let candidate = start as u32 + steps * every as u32;
    (candidate <= end as u32).then_some(candidate as u16)
}

fn prev_in_step(start: u16, end: u16, every: u16, from: u16) -> Option<u16> {
    if from < start {
        return None;
    }
    let candidate = from.min(end);
    Some(start + ((candidate - start) / every) * every)
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec)
    }
}
