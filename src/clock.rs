//! Where "today" comes from.

use crate::CalendarDate;

pub trait Clock {
    /// Current local date; the time of day may be set
    fn today(&self) -> CalendarDate;
}

/// Reads the local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from(chrono::Local::now().naive_local())
    }
}

/// A clock pinned to one date, for tests and for hosts that render a fixed day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(CalendarDate);

impl FixedClock {
    pub const fn new(today: CalendarDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}
