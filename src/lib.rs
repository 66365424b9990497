//! Date math and keyboard navigation for an accessible calendar grid.
//!
//! [`CalendarDate`] and [`CalendarMonth`] do the arithmetic, [`CalendarState`]
//! is the navigation state machine, and [`Calendar`] wires it to an
//! [`Announcer`], a change handler and a [`Clock`]. Rendering is left to the
//! host; [`Calendar::rows`] and [`Calendar::snapshot`] describe every cell.

mod announce;
mod calendar;
mod clock;
mod consts;
mod date;
mod key;
mod labels;
mod month;
mod options;
mod prelude;
mod state;
mod types;

#[cfg(test)]
mod test_utils;

pub use announce::{Announcement, Announcer, FnAnnouncer, LiveRegion, Politeness, from_fn};
pub use calendar::{Calendar, CalendarBuilder, CalendarError, ChangeHandler, DayCell, Snapshot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use date::{CalendarDate, ParseError, is_valid_date, to_date_string};
pub use key::{Key, UnknownKey};
pub use labels::{date_label, day_cell_label, grid_label, month_label, selection_message};
pub use month::{CalendarMonth, Week, WeekGrid};
pub use options::{CalendarOptions, ConfigError, EscapeBehavior};
pub use state::{CalendarState, Transition, ValueChange};
pub use types::{Day, Month, TimeOfDay, Weekday, Year, days_in_month, days_in_year, is_leap_year};
