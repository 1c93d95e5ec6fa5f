use crate::{utils, CronError, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use std::{cmp::Ordering, fmt::Display};

/// Naive calendar instant with minute resolution.
///
/// Month is stored zero-based and the day of week (Sunday is `0`) is carried along with the date,
/// so [`advance`](CivilInstant::advance) never has to recompute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CivilFields"))]
#[cfg_attr(feature = "serde", serde(into = "CivilFields"))]
pub struct CivilInstant {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    weekday: u8,
}

impl CivilInstant {
    /// Constructs an instant from the calendar date (1-based `month` and `day`) and time of day.
    ///
    /// Returns [`CronError::InvalidDateTime`] if such a date or time doesn't exist,
    /// or the year is out of the range `chrono` supports.
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self> {
        if year < NaiveDate::MIN.year()
            || year > NaiveDate::MAX.year()
            || month == 0
            || month > 12
            || day == 0
            || day > utils::days_in_month(year, month)
            || hour > 23
            || minute > 59
        {
            return Err(CronError::InvalidDateTime(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
            )));
        }

        Ok(Self {
            year,
            month: month - 1,
            day,
            hour,
            minute,
            weekday: utils::day_of_week(year, month, day),
        })
    }

    /// Current local wall-clock time, truncated to the minute.
    pub fn now() -> Self {
        Self::from(Local::now().naive_local())
    }

    /// Year.
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1-based.
    #[inline]
    pub fn month(&self) -> u8 {
        self.month + 1
    }

    /// Month, 0-based.
    #[inline]
    pub fn month0(&self) -> u8 {
        self.month
    }

    /// Day of month, 1-based.
    #[inline]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour of day.
    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of hour.
    #[inline]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Day of week, Sunday is `0`.
    #[inline]
    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Moves the instant one minute forward, carrying into hours, days, months and years.
    pub fn advance(&mut self) {
        self.minute += 1;
        if self.minute < 60 {
            return;
        }

        self.minute = 0;
        self.hour += 1;
        if self.hour < 24 {
            return;
        }

        self.hour = 0;
        self.weekday = (self.weekday + 1) % 7;
        self.day += 1;
        if self.day <= utils::days_in_month(self.year, self.month + 1) {
            return;
        }

        self.day = 1;
        self.month += 1;
        if self.month < 12 {
            return;
        }

        self.month = 0;
        self.year += 1;
    }

    /// Returns `true` if this instant is more than a year after `start`, at month resolution.
    pub(crate) fn is_year_past(&self, start: &Self) -> bool {
        let next_year = start.year.saturating_add(1);
        self.year > next_year || (self.year == next_year && self.month > start.month)
    }

    #[inline]
    fn key(&self) -> (i32, u8, u8, u8, u8) {
        (self.year, self.month, self.day, self.hour, self.minute)
    }
}

impl PartialOrd for CivilInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Chronological order; the day of week follows from the date and takes no part.
impl Ord for CivilInstant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl From<NaiveDateTime> for CivilInstant {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month0() as u8,
            day: value.day() as u8,
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            weekday: value.weekday().num_days_from_sunday() as u8,
        }
    }
}

impl TryFrom<CivilInstant> for NaiveDateTime {
    type Error = CronError;

    fn try_from(value: CivilInstant) -> Result<Self> {
        NaiveDate::from_ymd_opt(value.year, value.month() as u32, value.day as u32)
            .and_then(|date| date.and_hms_opt(value.hour as u32, value.minute as u32, 0))
            .ok_or_else(|| CronError::InvalidDateTime(value.to_string()))
    }
}

/// Serialized form of [`CivilInstant`]: 1-based month, day of week is derived on the way back.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CivilFields {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
}

#[cfg(feature = "serde")]
impl From<CivilInstant> for CivilFields {
    fn from(value: CivilInstant) -> Self {
        Self {
            year: value.year,
            month: value.month(),
            day: value.day,
            hour: value.hour,
            minute: value.minute,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<CivilFields> for CivilInstant {
    type Error = CronError;

    fn try_from(value: CivilFields) -> Result<Self> {
        Self::new(value.year, value.month, value.day, value.hour, value.minute)
    }
}

/// Renders `YYYY-MM-DD HH:MM` with the hour padded by a space.
impl Display for CivilInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:2}:{:02}",
            self.year,
            self.month(),
            self.day,
            self.hour,
            self.minute
        )
    }
}
