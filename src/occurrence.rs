//! Occurrence search: a field-by-field candidate walk with carry propagation.
//!
//! The search walks the fields from coarsest (year) to finest (minute).
//! Whenever a coarser field advances past the start value, every finer
//! field's bound resets to its extreme, so no valid combination is skipped.
//! The year field is bounded by the expression's horizon, which guarantees
//! termination for unsatisfiable expressions.

use crate::{
    calendar::{Calendar, Moment},
    expression::{DaySelector, Expression},
    field::{Field, FieldSpec},
};
use std::collections::BTreeSet;

/// Earliest occurrence at or after `start`.
///
/// Inclusive of `start` itself; the strict-successor semantics of
/// [`Expression::next`](crate::Expression::next) come from advancing the
/// reference by one minute before calling this.
pub(crate) fn next_occurrence<C: Calendar>(expr: &Expression, cal: &C, start: Moment) -> Option<Moment> {
    let mut year_from = start.year;
    while let Some(year) = expr.years().next_value(year_from) {
        let fresh_year = year > start.year;
        let mut month_from = if fresh_year { 1 } else { start.month };
        while let Some(month) = expr.months().next_value(month_from) {
            let fresh_month = fresh_year || month > start.month;
            let day_from = if fresh_month { 1 } else { start.day };
            let days = day_candidates(expr, cal, year, month);
            for &day in days.range(day_from..) {
                let fresh_day = fresh_month || day > start.day;
                let mut hour_from = if fresh_day { 0 } else { start.hour };
                while let Some(hour) = expr.hours().next_value(hour_from) {
                    let minute_from = if fresh_day || hour > start.hour { 0 } else { start.minute };
                    if let Some(minute) = expr.minutes().next_value(minute_from) {
                        return Some(Moment {
                            year,
                            month,
                            day,
                            hour,
                            minute,
                        });
                    }
                    if hour == 23 {
                        break;
                    }
                    hour_from = hour + 1;
                }
            }
            if month == 12 {
                break;
            }
            month_from = month + 1;
        }
        year_from = year.checked_add(1)?;
    }
    None
}

/// Latest occurrence at or before `start`; the mirror of [`next_occurrence`].
pub(crate) fn previous_occurrence<C: Calendar>(expr: &Expression, cal: &C, start: Moment) -> Option<Moment> {
    let mut year_from = start.year;
    while let Some(year) = expr.years().prev_value(year_from) {
        let fresh_year = year < start.year;
        let mut month_from = if fresh_year { 12 } else { start.month };
        while let Some(month) = expr.months().prev_value(month_from) {
            let fresh_month = fresh_year || month < start.month;
            let day_from = if fresh_month {
                cal.days_in_month(year, month)
            } else {
                start.day
            };
            let days = day_candidates(expr, cal, year, month);
            for &day in days.range(..=day_from).rev() {
                let fresh_day = fresh_month || day < start.day;
                let mut hour_from = if fresh_day { 23 } else { start.hour };
                while let Some(hour) = expr.hours().prev_value(hour_from) {
                    let minute_from = if fresh_day || hour < start.hour { 59 } else { start.minute };
                    if let Some(minute) = expr.minutes().prev_value(minute_from) {
                        return Some(Moment {
                            year,
                            month,
                            day,
                            hour,
                            minute,
                        });
                    }
                    if hour == 0 {
                        break;
                    }
                    hour_from = hour - 1;
                }
            }
            if month == 1 {
                break;
            }
            month_from = month - 1;
        }
        year_from = year.checked_sub(1)?;
    }
    None
}

/// Direct predicate check of a single moment, no search involved.
pub(crate) fn matches<C: Calendar>(expr: &Expression, cal: &C, at: Moment) -> bool {
    expr.years().contains(at.year)
        && expr.months().contains(at.month)
        && expr.hours().contains(at.hour)
        && expr.minutes().contains(at.minute)
        && day_candidates(expr, cal, at.year, at.month).contains(&at.day)
}

/// Concrete days of `(year, month)` admitted by the selecting day field.
///
/// May be empty: a derived day can fall outside the month (fifth Friday,
/// `L-30` in February), in which case the search carries to the next month.
pub(crate) fn day_candidates<C: Calendar>(expr: &Expression, cal: &C, year: u16, month: u16) -> BTreeSet<u16> {
    let last = cal.days_in_month(year, month);
    match expr.day_selector() {
        DaySelector::ByDayOfMonth => dom_days(expr.day_of_month(), cal, year, month, last),
        DaySelector::ByDayOfWeek => dow_days(expr.day_of_week(), cal, year, month, last),
    }
}

fn dom_days<C: Calendar>(field: &Field, cal: &C, year: u16, month: u16, last: u16) -> BTreeSet<u16> {
    match field.spec() {
        FieldSpec::LastDom { offset } => last
            .checked_sub(*offset)
            .filter(|day| *day >= 1)
            .into_iter()
            .collect(),
        FieldSpec::NearestWeekday(day) => nearest_weekday(cal, year, month, *day).into_iter().collect(),
        FieldSpec::LastWeekday => nearest_weekday(cal, year, month, last).into_iter().collect(),
        _ => (1..=last).filter(|day| field.contains(*day)).collect(),
    }
}

fn dow_days<C: Calendar>(field: &Field, cal: &C, year: u16, month: u16, last: u16) -> BTreeSet<u16> {
    match field.spec() {
        FieldSpec::LastDow(weekday) => {
            // Any weekday occurs within the last seven days of the month.
            let mut day = last;
            while cal.weekday_of(year, month, day) != *weekday {
                day -= 1;
            }
            BTreeSet::from([day])
        }
        FieldSpec::NthDow { weekday, nth } => {
            let first = cal.weekday_of(year, month, 1);
            let day = 1 + (weekday + 7 - first) % 7 + (nth - 1) * 7;
            (day <= last).then_some(day).into_iter().collect()
        }
        _ => (1..=last)
            .filter(|day| field.contains(cal.weekday_of(year, month, *day)))
            .collect(),
    }
}

/// Nearest Monday-Friday day to `day` within the same month, probing the
/// target day itself, then +1, -1, +2, -2.
fn nearest_weekday<C: Calendar>(cal: &C, year: u16, month: u16, day: u16) -> Option<u16> {
    let last = cal.days_in_month(year, month);
    [0i32, 1, -1, 2, -2].into_iter().find_map(|offset| {
        let candidate = day as i32 + offset;
        if candidate < 1 || candidate > last as i32 {
            return None;
        }
        let candidate = candidate as u16;
        (cal.weekday_of(year, month, candidate) <= 5).then_some(candidate)
    })
}
