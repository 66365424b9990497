//! Stateful wrapper that owns a [`CalendarState`] and delivers its effects.
//!
//! [`Calendar`] applies each [`Transition`] atomically, then hands the
//! announcement (if any) to the attached [`Announcer`] and the value change
//! (if any) to the host's change handler, in that order.

use serde::Serialize;

use crate::announce::Announcer;
use crate::clock::{Clock, SystemClock};
use crate::key::Key;
use crate::labels::{day_cell_label, grid_label, month_label};
use crate::month::{CalendarMonth, WeekGrid};
use crate::options::{CalendarOptions, ConfigError};
use crate::state::{CalendarState, InitialValue, Transition};
use crate::CalendarDate;

/// Called with the new selected value; `None` when it was cleared
pub type ChangeHandler = Box<dyn FnMut(Option<CalendarDate>)>;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("no announcer attached; selection and month changes would be silent")]
    MissingAnnouncer,
    #[error("invalid calendar options: {0}")]
    Config(#[from] ConfigError),
}

/// Everything a renderer needs for one day cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDate,
    pub day_of_month: u8,
    pub label: String,
    pub selected: bool,
    pub focused: bool,
    pub today: bool,
    pub outside_month: bool,
    pub tab_index: i32,
}

/// Read-only view of the grid for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: CalendarState,
    pub heading: String,
    pub grid_label: String,
    pub today: CalendarDate,
    pub weeks: WeekGrid,
}

pub struct Calendar {
    state: CalendarState,
    options: CalendarOptions,
    announcer: Box<dyn Announcer>,
    on_change: Option<ChangeHandler>,
    clock: Box<dyn Clock>,
}

impl Calendar {
    pub fn builder() -> CalendarBuilder {
        CalendarBuilder::default()
    }

    pub const fn state(&self) -> &CalendarState {
        &self.state
    }

    pub const fn options(&self) -> &CalendarOptions {
        &self.options
    }

    /// Today at midnight
    pub fn today(&self) -> CalendarDate {
        self.clock.today().date()
    }

    pub fn snapshot(&self) -> Snapshot {
        let month = self.state.displayed_month();
        Snapshot {
            state: self.state,
            heading: month_label(month),
            grid_label: grid_label(month),
            today: self.today(),
            weeks: self.state.week_grid(),
        }
    }

    /// Month heading, e.g. "June 2023"
    pub fn heading(&self) -> String {
        month_label(self.state.displayed_month())
    }

    pub fn is_today(&self, date: CalendarDate) -> bool {
        date.is_today(&self.clock)
    }

    pub fn day_cell(&self, date: CalendarDate) -> DayCell {
        let selected = self.state.is_selected(date);
        let today = self.is_today(date);
        DayCell {
            date,
            day_of_month: date.day(),
            label: day_cell_label(date, today, selected),
            selected,
            focused: self.state.is_focused(date),
            today,
            outside_month: !self.state.is_same_month_as_displayed(date),
            tab_index: self.state.tab_index(date),
        }
    }

    /// One row of cells per grid week
    pub fn rows(&self) -> Vec<Vec<DayCell>> {
        self.state
            .week_grid()
            .iter()
            .map(|week| week.iter().map(|d| self.day_cell(*d)).collect())
            .collect()
    }

    /// Returns whether the key was consumed; the host should suppress the
    /// browser default (scrolling, form submit) when it was
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.state.handle_key(key, &self.options) {
            Some(transition) => {
                log::debug!("{key} handled");
                self.apply(transition);
                true
            }
            None => {
                log::debug!("{key} left to host");
                false
            }
        }
    }

    /// Like [`Calendar::handle_key`] for a raw `KeyboardEvent.key` value
    pub fn handle_dom_key(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(key) => self.handle_key(key),
            None => {
                log::trace!("ignoring key {key:?}");
                false
            }
        }
    }

    pub fn select_day(&mut self, date: CalendarDate) {
        let transition = self.state.select_day(date, self.options.pointer_focuses);
        self.apply(transition);
    }

    pub fn focus_day(&mut self, date: CalendarDate) {
        let transition = self.state.focus_day(date);
        self.apply(transition);
    }

    pub fn blur(&mut self) {
        let transition = self.state.blur();
        self.apply(transition);
    }

    pub fn navigate_previous_month(&mut self) {
        let transition = self.state.navigate_previous_month();
        self.apply(transition);
    }

    pub fn navigate_next_month(&mut self) {
        let transition = self.state.navigate_next_month();
        self.apply(transition);
    }

    /// Mirrors a value set outside the grid; the change handler is not called
    pub fn set_value(&mut self, value: Option<CalendarDate>) {
        let transition = self.state.replace_value(value);
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        let Transition {
            state,
            announcement,
            change,
        } = transition;

        if state != self.state {
            log::trace!("{:?} -> {:?}", self.state, state);
        }
        self.state = state;

        if let Some(announcement) = announcement {
            let timeout = self.options.timeout_for(announcement.live);
            log::debug!("announcing {:?} ({})", announcement.message, announcement.live);
            self.announcer.announce(announcement.with_timeout(timeout));
        }

        if let Some(change) = change {
            log::debug!("value change: {:?}", change.0);
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(change.0);
            }
        }
    }
}

/// Collects the collaborators a [`Calendar`] needs.
///
/// An announcer is mandatory; everything else has a default: the system
/// clock, [`CalendarOptions::default`], no change handler and the month of
/// the initial value (or of today).
#[derive(Default)]
pub struct CalendarBuilder {
    announcer: Option<Box<dyn Announcer>>,
    on_change: Option<ChangeHandler>,
    clock: Option<Box<dyn Clock>>,
    options: CalendarOptions,
    initial: InitialValue,
}

impl CalendarBuilder {
    #[must_use]
    pub fn announcer(mut self, announcer: impl Announcer + 'static) -> Self {
        self.announcer = Some(Box::new(announcer));
        self
    }

    #[must_use]
    pub fn on_change(mut self, on_change: impl FnMut(Option<CalendarDate>) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    #[must_use]
    pub fn options(mut self, options: CalendarOptions) -> Self {
        self.options = options;
        self
    }

    /// Pre-selected date
    #[must_use]
    pub const fn initial_value(mut self, value: Option<CalendarDate>) -> Self {
        self.initial.value = value;
        self
    }

    /// Month shown first, overriding the month of the initial value
    #[must_use]
    pub const fn displayed_month(mut self, month: CalendarMonth) -> Self {
        self.initial.displayed_month = Some(month);
        self
    }

    /// # Errors
    /// `CalendarError::MissingAnnouncer` without an announcer,
    /// `CalendarError::Config` if the options do not validate.
    pub fn build(self) -> Result<Calendar, CalendarError> {
        let announcer = self.announcer.ok_or(CalendarError::MissingAnnouncer)?;
        self.options.validate()?;

        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let state = CalendarState::with_initial(self.initial, &*clock);
        log::debug!(
            "calendar ready on {} (value {:?})",
            state.displayed_month(),
            state.selected()
        );

        Ok(Calendar {
            state,
            options: self.options,
            announcer,
            on_change: self.on_change,
            clock,
        })
    }
}
