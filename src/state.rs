//! The calendar grid as a pure state machine.
//!
//! Every operation consumes a [`CalendarState`] and returns a [`Transition`]
//! holding the complete next state plus at most one announcement and at most
//! one value-change notification. Nothing is updated in place, so a renderer
//! never observes focus and the roving tab stop out of step.

use serde::{Deserialize, Serialize};

use crate::CalendarDate;
use crate::announce::Announcement;
use crate::clock::Clock;
use crate::consts::SELECTION_ANNOUNCEMENT_TIMEOUT;
use crate::key::Key;
use crate::labels::selection_message;
use crate::month::{CalendarMonth, WeekGrid};
use crate::options::{CalendarOptions, EscapeBehavior};

/// Snapshot of a calendar grid.
///
/// `focused` is the cell that has keyboard focus right now, `None` while the
/// grid is blurred. `focus_target` is the one cell with `tabindex=0`; it
/// survives blur so tabbing back in resumes on the same day. Whenever
/// `focused` is set it equals `focus_target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarState {
    displayed_month: CalendarMonth,
    selected: Option<CalendarDate>,
    focused: Option<CalendarDate>,
    focus_target: CalendarDate,
}

/// Where a new grid starts, as supplied by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialValue {
    /// Pre-selected date
    pub value: Option<CalendarDate>,
    /// Month shown first; defaults to the month of `value`, then of today
    pub displayed_month: Option<CalendarMonth>,
}

/// The value reported to the host's change handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ValueChange(pub Option<CalendarDate>);

/// Result of one user action
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub state: CalendarState,
    pub announcement: Option<Announcement>,
    pub change: Option<ValueChange>,
}

impl Transition {
    /// A state change with no side effects
    pub const fn quiet(state: CalendarState) -> Self {
        Self {
            state,
            announcement: None,
            change: None,
        }
    }

    fn announcing(mut self, announcement: Announcement) -> Self {
        self.announcement = Some(announcement);
        self
    }

    const fn notifying(mut self, value: Option<CalendarDate>) -> Self {
        self.change = Some(ValueChange(value));
        self
    }
}

impl CalendarState {
    /// Starts a grid showing `displayed_month` with an optional selection.
    ///
    /// The tab stop starts on the selection if it is in view, then on
    /// `today` if that is in view, then on the first of the month.
    pub fn new(
        displayed_month: CalendarMonth,
        selected: Option<CalendarDate>,
        today: CalendarDate,
    ) -> Self {
        let focus_target = [selected, Some(today)]
            .into_iter()
            .flatten()
            .find(|d| displayed_month.contains(*d))
            .unwrap_or_else(|| displayed_month.first_day());

        Self {
            displayed_month,
            selected,
            focused: None,
            focus_target,
        }
    }

    /// Starts from host-supplied values, reading "today" from `clock`
    pub fn with_initial(initial: InitialValue, clock: &dyn Clock) -> Self {
        let today = clock.today().date();
        let month = initial
            .displayed_month
            .unwrap_or_else(|| CalendarMonth::of(initial.value.unwrap_or(today)));
        Self::new(month, initial.value, today)
    }

    pub const fn displayed_month(&self) -> CalendarMonth {
        self.displayed_month
    }

    pub const fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    pub const fn focused(&self) -> Option<CalendarDate> {
        self.focused
    }

    pub const fn focus_target(&self) -> CalendarDate {
        self.focus_target
    }

    /// Rows of the displayed month
    pub fn week_grid(&self) -> WeekGrid {
        self.displayed_month.week_grid()
    }

    // --- queries ---

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.selected.is_some_and(|s| s.is_same_day(date))
    }

    pub fn is_focused(&self, date: CalendarDate) -> bool {
        self.focused.is_some_and(|f| f.is_same_day(date))
    }

    /// Whether `date` holds the grid's single tab stop
    pub fn is_internal_focus_target(&self, date: CalendarDate) -> bool {
        self.focus_target.is_same_day(date)
    }

    /// `tabindex` for the cell showing `date`
    pub fn tab_index(&self, date: CalendarDate) -> i32 {
        if self.is_internal_focus_target(date) {
            0
        } else {
            -1
        }
    }

    /// False for the padding days borrowed from neighbouring months
    pub fn is_same_month_as_displayed(&self, date: CalendarDate) -> bool {
        self.displayed_month.contains(date)
    }

    // --- building blocks ---

    /// Moves keyboard focus and the tab stop together
    fn focusing(self, date: CalendarDate) -> Self {
        let date = focusable(date);
        Self {
            focused: Some(date),
            focus_target: date,
            ..self
        }
    }

    /// Brings the month of `date` into view if it is not already
    fn revealing(self, date: CalendarDate) -> Self {
        if self.displayed_month.contains(date) {
            self
        } else {
            Self {
                displayed_month: CalendarMonth::of(date),
                ..self
            }
        }
    }

    /// Moves the displayed month and carries the tab stop along, clamped
    fn showing_month(self, month: CalendarMonth) -> Self {
        let focus_target = month.same_day_as(self.focus_target);
        Self {
            displayed_month: month,
            focused: self.focused.map(|_| focus_target),
            focus_target,
            ..self
        }
    }

    fn focus_by_days(self, days: i64) -> Transition {
        let next = match self.focused {
            Some(current) => current.add_days(days),
            // Nothing focused yet: land on the anchor without moving
            None => self
                .selected
                .unwrap_or_else(|| self.displayed_month.first_day()),
        };
        let next = focusable(next);
        Transition::quiet(self.revealing(next).focusing(next))
    }

    fn page_to(self, month: CalendarMonth) -> Transition {
        let from = self
            .focused
            .unwrap_or_else(|| self.displayed_month.first_day());
        let landing = month.same_day_as(from);
        Transition::quiet(
            Self {
                displayed_month: month,
                ..self
            }
            .focusing(landing),
        )
    }

    fn committing(self, date: CalendarDate) -> Transition {
        Transition::quiet(Self {
            selected: Some(date),
            ..self
        })
        .announcing(
            Announcement::polite(selection_message(date))
                .with_timeout(SELECTION_ANNOUNCEMENT_TIMEOUT),
        )
        .notifying(Some(date))
    }

    // --- month navigation buttons ---

    pub fn navigate_previous_month(self) -> Transition {
        self.navigate_to(self.displayed_month.previous())
    }

    pub fn navigate_next_month(self) -> Transition {
        self.navigate_to(self.displayed_month.next())
    }

    fn navigate_to(self, month: CalendarMonth) -> Transition {
        Transition::quiet(self.showing_month(month)).announcing(Announcement::assertive(month.label()))
    }

    // --- arrow keys ---

    pub fn focus_previous_day(self) -> Transition {
        self.focus_by_days(-1)
    }

    pub fn focus_next_day(self) -> Transition {
        self.focus_by_days(1)
    }

    pub fn focus_previous_week(self) -> Transition {
        self.focus_by_days(-7)
    }

    pub fn focus_next_week(self) -> Transition {
        self.focus_by_days(7)
    }

    // --- paging ---

    pub fn page_previous_month(self) -> Transition {
        self.page_to(self.displayed_month.previous())
    }

    pub fn page_next_month(self) -> Transition {
        self.page_to(self.displayed_month.next())
    }

    // --- Home / End ---

    pub fn focus_start_of_month(self) -> Transition {
        let first = self.displayed_month.first_day();
        Transition::quiet(self.focusing(first))
    }

    pub fn focus_end_of_month(self) -> Transition {
        let last = self.displayed_month.last_day();
        Transition::quiet(self.focusing(last))
    }

    // --- commit ---

    /// Enter / Space: selects the focused day. Nothing happens while blurred.
    pub fn commit_focused(self) -> Transition {
        match self.focused {
            Some(date) => self.committing(date),
            None => Transition::quiet(self),
        }
    }

    /// Pointer click on a day cell
    pub fn select_day(self, date: CalendarDate, move_focus: bool) -> Transition {
        let state = if move_focus { self.focusing(date) } else { self };
        state.committing(date)
    }

    /// Escape; `None` means the key is left to the host
    pub fn escape(self, behavior: EscapeBehavior) -> Option<Transition> {
        match behavior {
            EscapeBehavior::Reconfirm => Some(Transition::quiet(self).notifying(self.selected)),
            EscapeBehavior::Clear => Some(
                Transition::quiet(Self {
                    selected: None,
                    ..self
                })
                .notifying(None),
            ),
            EscapeBehavior::Ignore => None,
        }
    }

    // --- focus bookkeeping from the presentation layer ---

    /// A day cell received focus (pointer or programmatic)
    pub fn focus_day(self, date: CalendarDate) -> Transition {
        Transition::quiet(self.focusing(date))
    }

    /// The grid lost focus; the tab stop stays put
    pub fn blur(self) -> Transition {
        Transition::quiet(Self {
            focused: None,
            ..self
        })
    }

    /// Replaces the selection from outside the grid (e.g. a typed date).
    ///
    /// Shows the new value's month and moves the tab stop onto it. The host
    /// already knows the value, so no change is reported back.
    pub fn replace_value(self, value: Option<CalendarDate>) -> Transition {
        let state = Self {
            selected: value,
            ..self
        };
        match value.map(focusable) {
            Some(date) => Transition::quiet(Self {
                focus_target: date,
                focused: state.focused.map(|_| date),
                ..state.revealing(date)
            }),
            None => Transition::quiet(state),
        }
    }

    /// Routes one key press; `None` means the key was not handled and the
    /// host should let its default action run
    pub fn handle_key(self, key: Key, options: &CalendarOptions) -> Option<Transition> {
        let transition = match key {
            Key::ArrowLeft => self.focus_previous_day(),
            Key::ArrowRight => self.focus_next_day(),
            Key::ArrowUp => self.focus_previous_week(),
            Key::ArrowDown => self.focus_next_week(),
            Key::PageUp => self.page_previous_month(),
            Key::PageDown => self.page_next_month(),
            Key::Home => self.focus_start_of_month(),
            Key::End => self.focus_end_of_month(),
            Key::Enter | Key::Space => self.commit_focused(),
            Key::Escape => return self.escape(options.escape),
        };
        Some(transition)
    }
}

/// Clamps `date` to the last cell any grid renders
fn focusable(date: CalendarDate) -> CalendarDate {
    let last = CalendarMonth::last_grid_day();
    if date.is_same_day(last) || date < last {
        date
    } else {
        last.with_time(date.time())
    }
}
