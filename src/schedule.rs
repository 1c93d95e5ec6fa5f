use crate::{
    field::{FieldKind, ScheduleField},
    utils, CivilInstant, CronError, Result,
};
use std::{fmt::Display, str::FromStr};
use tracing::trace;

/// Canonical five-field expansions of the `@keyword` shorthands. `None` stands for a schedule which never fires.
const KEYWORDS: [(&str, Option<&str>); 8] = [
    ("reboot", None),
    ("yearly", Some("0 0 1 1 *")),
    ("annually", Some("0 0 1 1 *")),
    ("monthly", Some("0 0 1 * *")),
    ("weekly", Some("0 0 * * 0")),
    ("daily", Some("0 0 * * *")),
    ("midnight", Some("0 0 * * *")),
    ("hourly", Some("0 * * * *")),
];

/// Which of the day fields is left out of matching.
///
/// When only one of day-of-month and day-of-week is restricted, the other one (a plain `*`) is ignored.
/// When both are restricted, or both are `*`, an instant matches if either of them matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IgnoredDays {
    /// Both day fields take part.
    #[default]
    None,
    /// Day of month is unrestricted, only day of week decides.
    DayOfMonth,
    /// Day of week is unrestricted, only day of month decides.
    DayOfWeek,
}

/// Represents a parsed cron schedule: five sets of values and the day fields relationship.
///
/// For the accepted syntax, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Schedule {
    minute: ScheduleField,
    hour: ScheduleField,
    dom: ScheduleField,
    month: ScheduleField,
    dow: ScheduleField,
    ignore: IgnoredDays,
}

impl Schedule {
    /// Parses and validates the whole provided `pattern`, five fields or `@keyword`.
    ///
    /// Alternative way to construct [`Schedule`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`CronError`] in a case provided pattern is unparsable or has trailing text.
    pub fn new(pattern: impl AsRef<str>) -> Result<Self> {
        let pattern = pattern.as_ref();
        let (schedule, rest) = Self::parse(pattern)?;

        if !rest.trim().is_empty() {
            return Err(CronError::InvalidCronSchedule(pattern.to_owned()));
        }

        Ok(schedule)
    }

    /// Parses the schedule at the start of a crontab line and returns it with the rest of the input.
    ///
    /// Leading whitespace and whole comment lines are skipped first. Whatever follows the schedule
    /// (owner, command, next lines) is returned untouched.
    pub fn parse(input: &str) -> Result<(Self, &str)> {
        let rest = utils::skip_irrelevant(input);
        if utils::is_eol(rest) {
            return Err(CronError::InvalidCronSchedule(input.to_owned()));
        }

        if let Some(rest) = rest.strip_prefix('@') {
            let len = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            let (keyword, rest) = rest.split_at(len);

            let expansion = KEYWORDS
                .iter()
                .find(|(name, _)| *name == keyword)
                .map(|(_, expansion)| *expansion)
                .ok_or_else(|| CronError::InvalidKeyword(keyword.to_owned()))?;

            trace!(keyword, ?expansion, "expanding schedule keyword");
            let schedule = match expansion {
                Some(fields) => Self::parse_fields(fields)?.0,
                None => Self::reboot(),
            };

            return Ok((schedule, rest));
        }

        Self::parse_fields(rest)
    }

    /// Schedule of the `@reboot` keyword: all fields are empty, so it never matches.
    pub fn reboot() -> Self {
        Self {
            minute: ScheduleField::empty(FieldKind::Minutes),
            hour: ScheduleField::empty(FieldKind::Hours),
            dom: ScheduleField::empty(FieldKind::Doms),
            month: ScheduleField::empty(FieldKind::Months),
            dow: ScheduleField::empty(FieldKind::Dows),
            ignore: IgnoredDays::None,
        }
    }

    fn parse_fields(input: &str) -> Result<(Self, &str)> {
        let (minute, rest) = ScheduleField::parse(FieldKind::Minutes, input)?;
        let (hour, rest) = ScheduleField::parse(FieldKind::Hours, rest)?;
        let (dom, rest) = ScheduleField::parse(FieldKind::Doms, rest)?;
        let (month, rest) = ScheduleField::parse(FieldKind::Months, rest)?;
        let (dow, rest) = ScheduleField::parse(FieldKind::Dows, rest)?;
        let dow = dow.fold_sunday();

        let ignore = match (dom.is_saturated(), dow.is_saturated()) {
            (true, false) => IgnoredDays::DayOfMonth,
            (false, true) => IgnoredDays::DayOfWeek,
            _ => IgnoredDays::None,
        };

        let schedule = Self {
            minute,
            hour,
            dom,
            month,
            dow,
            ignore,
        };

        Ok((schedule, rest))
    }

    /// Returns `true` if the schedule fires at the provided instant.
    pub fn matches(&self, instant: &CivilInstant) -> bool {
        self.minute.contains(instant.minute())
            && self.hour.contains(instant.hour())
            && self.month.contains(instant.month())
            && ((self.ignore != IgnoredDays::DayOfMonth && self.dom.contains(instant.day()))
                || (self.ignore != IgnoredDays::DayOfWeek && self.dow.contains(instant.weekday())))
    }

    /// Which day field is ignored while matching.
    #[inline]
    pub fn ignored_days(&self) -> IgnoredDays {
        self.ignore
    }

    /// Returns `true` for the schedule which can't fire at all, like `@reboot`.
    pub fn is_never(&self) -> bool {
        [self.minute, self.hour, self.dom, self.month, self.dow]
            .iter()
            .all(ScheduleField::is_empty)
    }
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.to_string()
    }
}

impl From<&Schedule> for String {
    fn from(value: &Schedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Schedule {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_never() {
            return write!(f, "@reboot");
        }

        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.dom, self.month, self.dow
        )
    }
}
