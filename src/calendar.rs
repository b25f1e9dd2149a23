use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Calendar arithmetic the occurrence search depends on.
///
/// The search itself only walks field values; everything that depends on the
/// shape of the calendar (month lengths, the weekday cycle, leap years) goes
/// through this trait, so the evaluator can be exercised against a
/// deterministic fake in tests. Implementations are expected to be pure.
pub trait Calendar {
    /// Number of days in `month` (1-12) of `year`.
    fn days_in_month(&self, year: u16, month: u16) -> u16;

    /// Day of the week of the given date, `1` = Monday through `7` = Sunday.
    fn weekday_of(&self, year: u16, month: u16, day: u16) -> u16;

    /// `true` if `year` is a leap year.
    fn is_leap_year(&self, year: u16) -> bool;
}

/// Proleptic Gregorian calendar, the one AWS schedules actually run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

impl Calendar for Gregorian {
    fn days_in_month(&self, year: u16, month: u16) -> u16 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year(year) => 29,
            2 => 28,
            _ => panic!("invalid month: {month}"),
        }
    }

    fn weekday_of(&self, year: u16, month: u16, day: u16) -> u16 {
        if day == 0 || month == 0 || month > 12 || day > self.days_in_month(year, month) {
            panic!("invalid date: {year:04}-{month:02}-{day:02}");
        }

        let month_offset: u16 = if self.is_leap_year(year) {
            [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
        } else {
            [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
        }[(month - 1) as usize];

        let year = year - 1;
        let dow = (day + month_offset + 5 * (year % 4) + 4 * (year % 100) + 6 * (year % 400)) % 7;

        // The congruence yields 0 for Sunday; fold it into the 1-7 cycle.
        match dow {
            0 => 7,
            _ => dow,
        }
    }

    fn is_leap_year(&self, year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }
}

/// A calendar point with minute resolution, ordered by calendar order.
///
/// The evaluator works exclusively on `Moment`s; conversion to and from
/// `chrono::DateTime` happens once at the public API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Moment {
    pub(crate) year: u16,
    pub(crate) month: u16,
    pub(crate) day: u16,
    pub(crate) hour: u16,
    pub(crate) minute: u16,
}

impl Moment {
    /// Decomposes a timestamp, discarding sub-minute components.
    ///
    /// Returns `None` for dates outside the representable year range.
    pub(crate) fn from_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> Option<Self> {
        let year = u16::try_from(value.year()).ok()?;
        Some(Self {
            year,
            month: value.month() as u16,
            day: value.day() as u16,
            hour: value.hour() as u16,
            minute: value.minute() as u16,
        })
    }

    /// Reassembles a timestamp in the given timezone.
    pub(crate) fn into_datetime<Tz: TimeZone>(self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.with_ymd_and_hms(
            self.year as i32,
            self.month as u32,
            self.day as u32,
            self.hour as u32,
            self.minute as u32,
            0,
        )
        .earliest()
    }
}
