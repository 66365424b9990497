use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_IN_WEEK, LAST_GRID_MONTH, MAX_WEEKS_IN_GRID, MAX_YEAR, MIN_DAY};
use crate::types::{Month, Year};
use crate::{CalendarDate, ParseError};

/// The month a calendar grid displays.
///
/// Ranges from 0001-01 to 9999-11, the months whose whole grid, padding
/// included, is representable. Orders chronologically. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthFields")]
pub struct CalendarMonth {
    year: Year,
    month: Month,
}

#[derive(Deserialize)]
struct MonthFields {
    year: u16,
    month: u8,
}

impl TryFrom<MonthFields> for CalendarMonth {
    type Error = ParseError;

    fn try_from(fields: MonthFields) -> Result<Self, Self::Error> {
        Self::new(fields.year, fields.month)
    }
}

impl CalendarMonth {
    /// # Errors
    /// Returns `ParseError` if the year or month is out of range, or
    /// `ParseError::MonthOutOfRange` for a month after [`CalendarMonth::last`].
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        let candidate = Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
        };
        if candidate > Self::last() {
            return Err(ParseError::MonthOutOfRange { year, month });
        }
        Ok(candidate)
    }

    /// Latest month a grid can show, 9999-11
    pub fn last() -> Self {
        Self {
            year: Year::saturating(i64::from(MAX_YEAR)),
            month: Month::saturating(LAST_GRID_MONTH),
        }
    }

    /// The month a grid shows `date` in: its own month, or
    /// [`CalendarMonth::last`] for dates after that month
    pub fn of(date: CalendarDate) -> Self {
        Self {
            year: date.year_typed(),
            month: date.month_typed(),
        }
        .min(Self::last())
    }

    /// Last cell of the last grid, 9999-12-05. Focus never moves past it.
    pub fn last_grid_day() -> CalendarDate {
        Self::last().last_day().end_of_week()
    }

    pub const fn year(self) -> u16 {
        self.year.get()
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    /// First of the month at midnight; the anchor date for an unfocused grid
    pub fn first_day(self) -> CalendarDate {
        self.clamp_day(MIN_DAY)
    }

    pub fn last_day(self) -> CalendarDate {
        self.first_day().end_of_month()
    }

    /// `day` of this month, clamped to the month's length
    pub fn clamp_day(self, day: u8) -> CalendarDate {
        CalendarDate::clamped(self.year, self.month, day)
    }

    /// The same day of month as `date` moved into this month, keeping its time
    pub fn same_day_as(self, date: CalendarDate) -> CalendarDate {
        self.clamp_day(date.day()).with_time(date.time())
    }

    /// Whether `date` falls in this month; padding days do not
    pub fn contains(self, date: CalendarDate) -> bool {
        date.year_typed() == self.year && date.month_typed() == self.month
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::of(self.first_day().next_month())
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::of(self.first_day().previous_month())
    }

    /// Human readable heading, e.g. "July 2023"
    pub fn label(self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }

    pub fn week_grid(self) -> WeekGrid {
        WeekGrid::new(self)
    }
}

impl From<CalendarDate> for CalendarMonth {
    fn from(date: CalendarDate) -> Self {
        Self::of(date)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year.get(), self.month.get())
    }
}

/// Seven consecutive dates, Monday through Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Week([CalendarDate; DAYS_IN_WEEK]);

impl Week {
    pub const fn days(&self) -> &[CalendarDate; DAYS_IN_WEEK] {
        &self.0
    }

    pub const fn monday(&self) -> CalendarDate {
        self.0[0]
    }

    pub const fn sunday(&self) -> CalendarDate {
        self.0[DAYS_IN_WEEK - 1]
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.0.iter().any(|d| d.is_same_day(date))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarDate> {
        self.0.iter()
    }
}

impl Index<usize> for Week {
    type Output = CalendarDate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Week {
    type Item = &'a CalendarDate;
    type IntoIter = std::slice::Iter<'a, CalendarDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whole weeks covering a displayed month, padded with neighbouring days.
///
/// Derived from the month alone and never edited; navigate the month to get
/// a different grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WeekGrid {
    month: CalendarMonth,
    weeks: Vec<Week>,
}

impl WeekGrid {
    pub fn new(month: CalendarMonth) -> Self {
        let mut weeks = Vec::with_capacity(MAX_WEEKS_IN_GRID);
        weeks.extend(month.first_day().weeks_in_month().into_iter().map(Week));
        Self { month, weeks }
    }

    pub const fn month(&self) -> CalendarMonth {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Week> {
        self.weeks.iter()
    }

    /// Every cell in reading order
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.weeks.iter().flat_map(|w| w.iter().copied())
    }

    /// Whether `date` has a cell in this grid, including padding days
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.weeks.iter().any(|w| w.contains(date))
    }

    /// (week, weekday column) of `date`, if it has a cell
    pub fn position(&self, date: CalendarDate) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(row, week)| {
            week.iter()
                .position(|d| d.is_same_day(date))
                .map(|col| (row, col))
        })
    }
}

impl<'a> IntoIterator for &'a WeekGrid {
    type Item = &'a Week;
    type IntoIter = std::slice::Iter<'a, Week>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_WEEKS_IN_GRID;
    use crate::test_utils::{date, datetime, month};
    use crate::types::Weekday;

    #[test]
    fn test_new_and_display() {
        assert_eq!(month(2023, 7).to_string(), "2023-07");
        assert!(matches!(CalendarMonth::new(2023, 13), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(CalendarMonth::new(0, 1), Err(ParseError::InvalidYear(0))));
    }

    #[test]
    fn test_of_and_contains() {
        let june = CalendarMonth::of(datetime(2023, 6, 30, 18, 0, 0, 0));
        assert_eq!(june, month(2023, 6));
        assert!(june.contains(date(2023, 6, 1)));
        assert!(!june.contains(date(2023, 7, 1)));
        assert!(!june.contains(date(2022, 6, 15)));
    }

    #[test]
    fn test_first_last_and_clamp() {
        let feb = month(2023, 2);
        assert_eq!(feb.first_day(), date(2023, 2, 1));
        assert_eq!(feb.last_day(), date(2023, 2, 28));
        assert_eq!(feb.clamp_day(31), date(2023, 2, 28));
        assert_eq!(month(2024, 2).clamp_day(31), date(2024, 2, 29));
        assert_eq!(month(2023, 7).clamp_day(0), date(2023, 7, 1));
        assert_eq!(month(1, 1).first_day(), date(1, 1, 1));
        assert_eq!(month(9999, 11).last_day(), date(9999, 11, 30));
        assert_eq!(
            month(2023, 4).same_day_as(datetime(2023, 3, 31, 10, 0, 0, 0)),
            datetime(2023, 4, 30, 10, 0, 0, 0)
        );
    }

    #[test]
    fn test_next_and_previous() {
        assert_eq!(month(2023, 6).next(), month(2023, 7));
        assert_eq!(month(2023, 12).next(), month(2024, 1));
        assert_eq!(month(2023, 1).previous(), month(2022, 12));
        assert_eq!(month(9999, 10).next(), month(9999, 11));
        assert_eq!(month(9999, 11).next(), month(9999, 11));
        assert_eq!(month(1, 1).previous(), month(1, 1));
    }

    #[test]
    fn test_last_month_is_november_9999() {
        assert_eq!(CalendarMonth::last(), month(9999, 11));
        assert!(matches!(
            CalendarMonth::new(9999, 12),
            Err(ParseError::MonthOutOfRange { year: 9999, month: 12 })
        ));
        assert_eq!(CalendarMonth::of(date(9999, 12, 31)), CalendarMonth::last());
        assert_eq!(CalendarMonth::of(date(9999, 11, 30)), CalendarMonth::last());
        assert_eq!(CalendarMonth::last_grid_day(), date(9999, 12, 5));
        assert_eq!(
            CalendarMonth::last().week_grid().weeks().last().map(Week::sunday),
            Some(CalendarMonth::last_grid_day())
        );
    }

    #[test]
    fn test_edge_grids_have_distinct_full_weeks() {
        for current in [month(1, 1), CalendarMonth::last()] {
            let grid = current.week_grid();
            assert!(
                (MIN_WEEKS_IN_GRID..=MAX_WEEKS_IN_GRID).contains(&grid.len()),
                "{current} has {} weeks",
                grid.len()
            );
            let days: Vec<CalendarDate> = grid.days().collect();
            assert_eq!(days.len(), grid.len() * DAYS_IN_WEEK);
            for pair in days.windows(2) {
                assert_eq!(pair[1], pair[0].next_day(), "{current} skips or repeats a day");
            }
            assert!(grid.contains(current.first_day()));
            assert!(grid.contains(current.last_day()));
        }
        assert_eq!(month(1, 1).week_grid().weeks()[0].monday(), date(1, 1, 1));
    }

    #[test]
    fn test_label() {
        assert_eq!(month(2023, 7).label(), "July 2023");
        assert_eq!(month(2024, 2).label(), "February 2024");
    }

    #[test]
    fn test_week_grid_june_2023() {
        let grid = month(2023, 6).week_grid();
        assert_eq!(grid.month(), month(2023, 6));
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.weeks()[0].monday(), date(2023, 5, 29));
        assert_eq!(grid.weeks()[4].sunday(), date(2023, 7, 2));
        assert_eq!(grid.position(date(2023, 6, 1)), Some((0, 3)));
        assert_eq!(grid.position(date(2023, 6, 30)), Some((4, 4)));
        assert_eq!(grid.position(date(2023, 7, 3)), None);
        assert!(grid.contains(date(2023, 5, 29)));
        assert_eq!(grid.days().count(), 35);
    }

    #[test]
    fn test_week_grid_shape_for_every_month_of_a_century() {
        let mut current = month(2000, 1);
        while current.year() < 2100 {
            let grid = current.week_grid();
            assert!(
                (MIN_WEEKS_IN_GRID..=MAX_WEEKS_IN_GRID).contains(&grid.len()),
                "{current} has {} weeks",
                grid.len()
            );
            for week in &grid {
                assert_eq!(week.monday().weekday(), Weekday::Monday);
                for (col, day) in week.iter().enumerate() {
                    assert_eq!(*day, week.monday().add_days(col as i64));
                }
            }
            assert_eq!(grid, current.week_grid(), "grid depends only on the month");
            current = current.next();
        }
    }

    #[test]
    fn test_serde() {
        let m = month(2023, 7);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"year":2023,"month":7}"#);
        assert_eq!(serde_json::from_str::<CalendarMonth>(&json).unwrap(), m);
        assert!(serde_json::from_str::<CalendarMonth>(r#"{"year":2023,"month":13}"#).is_err());
        assert!(serde_json::from_str::<CalendarMonth>(r#"{"year":9999,"month":12}"#).is_err());
        assert_eq!(
            serde_json::from_str::<CalendarMonth>(r#"{"year":9999,"month":11}"#).unwrap(),
            CalendarMonth::last()
        );
    }
}
