/// Common utility functions: name tables, calendar arithmetic and text scanning helpers.
use crate::field::FieldValue;

const MONTH_FULL_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DOW_FULL_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const DOW_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month name tables in lookup priority order.
pub(crate) const MONTH_NAMES: [&[&str]; 2] = [&MONTH_FULL_NAMES, &MONTH_ABBREVIATIONS];
/// Weekday name tables in lookup priority order.
pub(crate) const DOW_NAMES: [&[&str]; 2] = [&DOW_FULL_NAMES, &DOW_ABBREVIATIONS];

/// Looks up the alphabetic word at the start of `input` in `tables`.
///
/// Tables are tried in order, and so are entries inside a table. The word matches an entry
/// when it's a case-insensitive prefix of it, so `jan`, `Jan` and `January` are the same month.
/// Returns zero-based position of the first matched entry and length of the consumed word.
pub(crate) fn resolve_name(input: &str, tables: &[&[&str]]) -> Option<(FieldValue, usize)> {
    let len = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    if len == 0 {
        return None;
    }

    let word = &input[..len];
    tables
        .iter()
        .find_map(|table| {
            table
                .iter()
                .position(|name| name.len() >= len && name[..len].eq_ignore_ascii_case(word))
        })
        .map(|index| (index as FieldValue, len))
}

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified (1-based) month.
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    if month == 0 || month > 12 {
        panic!("Invalid month: {month}");
    }

    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!(),
    }
}

/// Calculates day of week (Sunday is 0) for specified date.
pub(crate) fn day_of_week(year: i32, month: u8, day: u8) -> u8 {
    if day == 0 || month == 0 || month > 12 || day > days_in_month(year, month) {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }

    let month_offset: i32 = if is_leap_year(year) {
        [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
    } else {
        [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
    }[(month - 1) as usize];

    let year = year - 1;
    let sum = day as i32
        + month_offset
        + 5 * year.rem_euclid(4)
        + 4 * year.rem_euclid(100)
        + 6 * year.rem_euclid(400);

    sum.rem_euclid(7) as u8
}

/// Skips spaces and tabs, but not line breaks.
#[inline]
pub(crate) fn skip_blanks(input: &str) -> &str {
    input.trim_start_matches([' ', '\t'])
}

/// Returns the text after the next line break, or an empty tail.
#[inline]
pub(crate) fn next_line(input: &str) -> &str {
    match input.find('\n') {
        Some(pos) => &input[pos + 1..],
        None => &input[input.len()..],
    }
}

/// Skips whitespace (line breaks included) and whole comment lines.
pub(crate) fn skip_irrelevant(input: &str) -> &str {
    let mut rest = input.trim_start();
    while rest.starts_with('#') {
        rest = next_line(rest).trim_start();
    }
    rest
}

/// Returns `true` at the end of the input or the current line.
#[inline]
pub(crate) fn is_eol(input: &str) -> bool {
    input.is_empty() || input.starts_with('\n')
}
