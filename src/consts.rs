use std::time::Duration;

/// Smallest representable year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive), the largest the `YYYY` field can hold
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Days in a week
pub const DAYS_IN_WEEK: usize = 7;
/// Fewest weeks a month grid can span (a 28-day February starting on Monday)
pub const MIN_WEEKS_IN_GRID: usize = 4;
/// Most weeks a month grid can span
pub const MAX_WEEKS_IN_GRID: usize = 6;
/// Last month of `MAX_YEAR` a grid can show. December would need padding
/// days from the year after `MAX_YEAR`; November's grid ends on 9999-12-05.
pub const LAST_GRID_MONTH: u8 = 11;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separates the date from the time of day in serialized values
pub const TIME_DESIGNATOR: char = 'T';

/// How long a selection announcement stays in the live region
pub const SELECTION_ANNOUNCEMENT_TIMEOUT: Duration = Duration::from_millis(4000);
/// How long a month-change announcement stays in the live region
pub const MONTH_ANNOUNCEMENT_TIMEOUT: Duration = Duration::from_millis(7000);
