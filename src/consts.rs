/// Year used to place month-day pairs on a single timeline.
/// 2000 is a leap year, so `02-29` is accepted as a recurring date.
pub const REFERENCE_YEAR: u16 = 2000;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

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

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator between month and day (`MM-DD`)
pub const MONTH_DAY_SEPARATOR: char = '-';
/// Separator between the two ends of a range (`MM-DD/MM-DD`)
pub const RANGE_SEPARATOR: char = '/';
/// Maximum digits in a month or day component
pub const MAX_COMPONENT_DIGITS: usize = 2;

/// Marker rendered in place of skipped pages
pub const ELLIPSIS: &str = "...";
/// Pages are 1-indexed
pub const FIRST_PAGE: u32 = 1;
/// Pages shown before the current one by default
pub const DEFAULT_LEFT_CURRENT: u32 = 2;
/// Pages shown after the current one by default
pub const DEFAULT_RIGHT_CURRENT: u32 = 3;
/// Rows per table page by default
pub const DEFAULT_PER_PAGE: u32 = 10;
