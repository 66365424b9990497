//! Calendar dates and the day/week/month/year arithmetic the grid is built on.
//!
//! Every operation here is total. Arithmetic that would leave the range
//! `0001-01-01..=9999-12-31` saturates at the nearest bound instead.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::clock::Clock;
use crate::consts::{
    DATE_SEPARATOR, DAYS_IN_WEEK, DECEMBER, JANUARY, LAST_GRID_MONTH, MAX_MONTH, MAX_WEEKS_IN_GRID,
    MAX_YEAR, MIN_DAY, MIN_YEAR, TIME_DESIGNATOR,
};
use crate::prelude::*;
use crate::types::{self, Day, Month, TimeOfDay, Weekday, Year};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid time {hour:02}:{minute:02}:{second:02}.{millisecond:03}")]
    InvalidTime {
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    },
    #[display(
        fmt = "Month {year}-{month:02} is past the last month a grid can show ({}-{:02})",
        MAX_YEAR,
        LAST_GRID_MONTH
    )]
    MonthOutOfRange { year: u16, month: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// A Gregorian calendar date with an optional time of day riding along.
///
/// Ordering is chronological: by date first, then by time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
    time: TimeOfDay,
}

const MIN_DAY_NUMBER: i64 = days_from_civil(MIN_YEAR as i64, JANUARY, MIN_DAY);
const MAX_DAY_NUMBER: i64 = days_from_civil(MAX_YEAR as i64, DECEMBER, 31);
const MONTHS_PER_YEAR: i64 = MAX_MONTH as i64;

impl CalendarDate {
    /// Creates a date at midnight, validating every component.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first component out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
            day: Day::new(day, year, month)?,
            time: TimeOfDay::MIDNIGHT,
        })
    }

    /// Earliest representable date, 0001-01-01
    pub fn min_value() -> Self {
        Self::from_day_number(MIN_DAY_NUMBER, TimeOfDay::MIDNIGHT)
    }

    /// Latest representable date, 9999-12-31
    pub fn max_value() -> Self {
        Self::from_day_number(MAX_DAY_NUMBER, TimeOfDay::MIDNIGHT)
    }

    /// Replaces the time of day, keeping the date
    #[must_use]
    pub const fn with_time(self, time: TimeOfDay) -> Self {
        Self { time, ..self }
    }

    /// Drops the time of day
    #[must_use]
    pub const fn date(self) -> Self {
        self.with_time(TimeOfDay::MIDNIGHT)
    }

    pub const fn year(self) -> u16 {
        self.year.get()
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    pub const fn day(self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(self) -> Year {
        self.year
    }

    pub const fn month_typed(self) -> Month {
        self.month
    }

    pub const fn day_typed(self) -> Day {
        self.day
    }

    pub const fn time(self) -> TimeOfDay {
        self.time
    }

    pub fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday, three days after Monday
        let offset = (self.day_number() + 3).rem_euclid(7);
        Weekday::from_days_from_monday(u8::try_from(offset).unwrap_or(0))
    }

    /// Days since 1970-01-01 (negative before)
    pub const fn day_number(self) -> i64 {
        days_from_civil(self.year.get() as i64, self.month.get(), self.day.get())
    }

    fn from_day_number(day_number: i64, time: TimeOfDay) -> Self {
        let (year, month, day) = civil_from_days(day_number.clamp(MIN_DAY_NUMBER, MAX_DAY_NUMBER));
        Self::from_civil_clamped(year, month, day, time)
    }

    /// `day` of the given month at midnight, clamped to the month's length
    pub(crate) fn clamped(year: Year, month: Month, day: u8) -> Self {
        Self::from_civil_clamped(i64::from(year.get()), month.get(), day, TimeOfDay::MIDNIGHT)
    }

    /// Builds a date from raw fields, saturating the year and clamping the day
    fn from_civil_clamped(year: i64, month: u8, day: u8, time: TimeOfDay) -> Self {
        let year = Year::saturating(year);
        let month = Month::saturating(month);
        Self {
            year,
            month,
            day: Day::clamped(day, year.get(), month.get()),
            time,
        }
    }

    // --- calendar boundaries ---

    #[must_use]
    pub fn start_of_month(self) -> Self {
        Self::from_civil_clamped(i64::from(self.year.get()), self.month.get(), MIN_DAY, self.time)
    }

    #[must_use]
    pub fn end_of_month(self) -> Self {
        Self {
            day: Day::last_of(self.year.get(), self.month.get()),
            ..self
        }
    }

    /// Monday of the ISO week containing this date
    #[must_use]
    pub fn start_of_week(self) -> Self {
        self.add_days(-i64::from(self.weekday().days_from_monday()))
    }

    /// Sunday of the ISO week containing this date
    #[must_use]
    pub fn end_of_week(self) -> Self {
        self.add_days(6 - i64::from(self.weekday().days_from_monday()))
    }

    #[must_use]
    pub fn start_of_year(self) -> Self {
        Self::from_civil_clamped(i64::from(self.year.get()), JANUARY, MIN_DAY, self.time)
    }

    #[must_use]
    pub fn end_of_year(self) -> Self {
        Self::from_civil_clamped(i64::from(self.year.get()), DECEMBER, u8::MAX, self.time)
    }

    /// The seven dates of the Monday-start week containing this date
    pub fn days_in_week(self) -> [Self; DAYS_IN_WEEK] {
        let monday = self.start_of_week();
        let mut days = [monday; DAYS_IN_WEEK];
        for (offset, slot) in (0_i64..).zip(days.iter_mut()) {
            *slot = monday.add_days(offset);
        }
        days
    }

    /// Number of days in this date's month (28..=31)
    pub const fn days_in_month(self) -> u8 {
        types::days_in_month(self.year.get(), self.month.get())
    }

    /// 365 or 366
    pub const fn days_in_year(self) -> u16 {
        types::days_in_year(self.year.get())
    }

    /// Whole Monday-start weeks covering every day of this date's month.
    ///
    /// Leading and trailing days from the neighbouring months fill the first
    /// and last week. December of `MAX_YEAR` is the one month whose last week
    /// runs past the representable range; its trailing cells repeat
    /// 9999-12-31. Calendar grids never show that month.
    pub fn weeks_in_month(self) -> Vec<[Self; DAYS_IN_WEEK]> {
        let month_end = self.end_of_month().day_number();
        let first_monday = self.start_of_month().start_of_week();
        let mut weeks = Vec::with_capacity(MAX_WEEKS_IN_GRID);

        // Step by raw day number so the loop itself never saturates
        let mut week_start = first_monday.day_number();
        while week_start <= month_end {
            weeks.push(Self::from_day_number(week_start, self.time).days_in_week());
            week_start += 7;
        }

        weeks
    }

    // --- arithmetic ---

    /// Moves by whole days, saturating at the representable range
    #[must_use]
    pub fn add_days(self, days: i64) -> Self {
        Self::from_day_number(self.day_number().saturating_add(days), self.time)
    }

    /// Moves by whole months keeping the day of month, clamped to the
    /// target month's length
    #[must_use]
    pub fn add_months(self, months: i64) -> Self {
        let first = i64::from(MIN_YEAR) * MONTHS_PER_YEAR;
        let last = i64::from(MAX_YEAR) * MONTHS_PER_YEAR + (MONTHS_PER_YEAR - 1);
        let total = (i64::from(self.year.get()) * MONTHS_PER_YEAR + i64::from(self.month.get() - 1))
            .saturating_add(months)
            .clamp(first, last);

        let month = u8::try_from(total.rem_euclid(MONTHS_PER_YEAR) + 1).unwrap_or(JANUARY);
        Self::from_civil_clamped(total.div_euclid(MONTHS_PER_YEAR), month, self.day.get(), self.time)
    }

    /// Moves by whole years; February 29th clamps to the 28th in common years
    #[must_use]
    pub fn add_years(self, years: i64) -> Self {
        self.add_months(years.saturating_mul(MONTHS_PER_YEAR))
    }

    #[must_use]
    pub fn next_day(self) -> Self {
        self.add_days(1)
    }

    #[must_use]
    pub fn previous_day(self) -> Self {
        self.add_days(-1)
    }

    #[must_use]
    pub fn next_week(self) -> Self {
        self.add_days(7)
    }

    #[must_use]
    pub fn previous_week(self) -> Self {
        self.add_days(-7)
    }

    #[must_use]
    pub fn next_month(self) -> Self {
        self.add_months(1)
    }

    #[must_use]
    pub fn previous_month(self) -> Self {
        self.add_months(-1)
    }

    #[must_use]
    pub fn next_year(self) -> Self {
        self.add_years(1)
    }

    #[must_use]
    pub fn previous_year(self) -> Self {
        self.add_years(-1)
    }

    // --- comparisons (time of day ignored) ---

    pub fn is_same_day(self, other: Self) -> bool {
        self.year == other.year && self.month == other.month && self.day == other.day
    }

    pub fn is_same_month(self, other: Self) -> bool {
        self.year == other.year && self.month == other.month
    }

    pub fn is_same_year(self, other: Self) -> bool {
        self.year == other.year
    }

    pub fn is_today<C: Clock + ?Sized>(self, clock: &C) -> bool {
        self.is_same_day(clock.today())
    }

    pub const fn is_leap_year(self) -> bool {
        self.year.is_leap()
    }

    /// Converts to chrono, keeping the time of day
    pub fn to_naive_date_time(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )?
        .and_hms_milli_opt(
            u32::from(self.time.hour()),
            u32::from(self.time.minute()),
            u32::from(self.time.second()),
            u32::from(self.time.millisecond()),
        )
    }
}

/// Strict `YYYY-MM-DD` check: zero-padded fields that name a real calendar day
pub fn is_valid_date(s: &str) -> bool {
    s.parse::<CalendarDate>().is_ok()
}

/// Canonical `YYYY-MM-DD` serialization
pub fn to_date_string(date: &CalendarDate) -> String {
    date.to_string()
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses exactly `YYYY-MM-DD`; no whitespace, no unpadded fields
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        if !(all_digits(year) && all_digits(month) && all_digits(day)) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        let year = year
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;

        Self::new(year, month, day)
    }
}

impl CalendarDate {
    /// Parses `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS[.mmm]`
    ///
    /// # Errors
    /// Returns `ParseError` if either half is malformed.
    pub fn parse_with_time(s: &str) -> Result<Self, ParseError> {
        match s.split_once(TIME_DESIGNATOR) {
            Some((date, time)) => Ok(date.parse::<Self>()?.with_time(time.parse()?)),
            None => s.parse(),
        }
    }

    /// `YYYY-MM-DD`, or `YYYY-MM-DDTHH:MM:SS.mmm` when a time is set
    pub fn to_timestamp_string(self) -> String {
        if self.time.is_midnight() {
            self.to_string()
        } else {
            format!("{self}{TIME_DESIGNATOR}{}", self.time)
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    /// Saturates years outside `1..=9999`
    fn from(value: NaiveDate) -> Self {
        match i64::from(value.year()) {
            y if y < i64::from(MIN_YEAR) => Self::min_value(),
            y if y > i64::from(MAX_YEAR) => Self::max_value(),
            y => Self::from_civil_clamped(
                y,
                u8::try_from(value.month()).unwrap_or(JANUARY),
                u8::try_from(value.day()).unwrap_or(MIN_DAY),
                TimeOfDay::MIDNIGHT,
            ),
        }
    }
}

impl From<NaiveDateTime> for CalendarDate {
    fn from(value: NaiveDateTime) -> Self {
        // Leap seconds report more than 999 ms; fold them into the last millisecond
        let millisecond = u16::try_from(value.nanosecond() / 1_000_000)
            .unwrap_or(999)
            .min(999);
        let time = TimeOfDay::new(
            u8::try_from(value.hour()).unwrap_or(0),
            u8::try_from(value.minute()).unwrap_or(0),
            u8::try_from(value.second()).unwrap_or(0),
            millisecond,
        )
        .unwrap_or_default();
        Self::from(value.date()).with_time(time)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_timestamp_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_with_time(&s).map_err(serde::de::Error::custom)
    }
}

// --- civil day numbering (proleptic Gregorian, day 0 = 1970-01-01) ---

#[allow(clippy::cast_possible_wrap)]
const fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month_from_march = (month as i64 + 9) % 12;
    let day_of_year = (153 * month_from_march + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn civil_from_days(day_number: i64) -> (i64, u8, u8) {
    let z = day_number + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_from_march = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_from_march + 2) / 5 + 1) as u8;
    let month = if month_from_march < 10 {
        month_from_march + 3
    } else {
        month_from_march - 9
    } as u8;
    let year = year_of_era + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}
