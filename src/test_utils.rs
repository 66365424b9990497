//! Shorthand constructors for tests.

use crate::{CalendarDate, CalendarMonth, TimeOfDay};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

pub fn datetime(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
) -> CalendarDate {
    date(year, month, day).with_time(TimeOfDay::new(hour, minute, second, millisecond).unwrap())
}

pub fn month(year: u16, month: u8) -> CalendarMonth {
    CalendarMonth::new(year, month).unwrap()
}
