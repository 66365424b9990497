//! Text read out by assistive technology. English only.

use crate::{CalendarDate, CalendarMonth};

/// Full date, e.g. "Friday, June 30, 2023"
pub fn date_label(date: CalendarDate) -> String {
    format!(
        "{}, {} {}, {}",
        date.weekday(),
        date.month_typed().name(),
        date.day(),
        date.year()
    )
}

/// Month heading, e.g. "June 2023"
pub fn month_label(month: CalendarMonth) -> String {
    month.label()
}

/// Accessible name of a day cell
pub fn day_cell_label(date: CalendarDate, is_today: bool, is_selected: bool) -> String {
    let mut label = String::new();
    if is_today {
        label.push_str("Today, ");
    }
    label.push_str(&date_label(date));
    if is_selected {
        label.push_str(" selected");
    }
    label
}

/// Announced after a commit
pub fn selection_message(date: CalendarDate) -> String {
    format!("Selected: {}", date_label(date))
}

/// Accessible name of the whole grid, e.g. "Calendar, June 2023"
pub fn grid_label(month: CalendarMonth) -> String {
    format!("Calendar, {}", month.label())
}
