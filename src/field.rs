use crate::{
    series::SeriesWithStep,
    utils::{self, DOW_NAMES, MONTH_NAMES},
    CronError, Result,
};
use std::fmt::Display;

pub(crate) type FieldValue = u8;

/// Kind of the schedule field: defines its domain and the way values are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum FieldKind {
    Minutes,
    Hours,
    Doms,
    Months,
    Dows,
}

/// Which end of a range is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Lower,
    Upper,
}

impl FieldKind {
    /// Accepted values while parsing. Days of week accept both `0` and `7` for Sunday.
    pub(crate) fn min_max(&self) -> (FieldValue, FieldValue) {
        match self {
            Self::Minutes => (0, 59),
            Self::Hours => (0, 23),
            Self::Doms => (1, 31),
            Self::Months => (1, 12),
            Self::Dows => (0, 7),
        }
    }

    /// Values which should be present to consider the field saturated, after folding.
    fn saturated_max(&self) -> FieldValue {
        match self {
            Self::Dows => 6,
            _ => self.min_max().1,
        }
    }

    fn names(&self) -> Option<(&'static [&'static [&'static str]], FieldValue)> {
        match self {
            Self::Months => Some((&MONTH_NAMES, 1)),
            Self::Dows => Some((&DOW_NAMES, 0)),
            _ => None,
        }
    }

    /// Reads a decimal or (if the field has names) mnemonic value from the start of `input`.
    ///
    /// Sunday spelled by name at the upper end of a weekday range means `7`,
    /// so `fri-sun` covers Friday to Sunday.
    fn read_value<'a>(&self, input: &'a str, bound: Bound) -> Result<(FieldValue, &'a str)> {
        if input.starts_with(|c: char| c.is_ascii_digit()) {
            return read_number(input);
        }

        let (tables, shift) = self
            .names()
            .ok_or_else(|| CronError::InvalidDigitalValue(token(input).to_owned()))?;
        let (index, len) = utils::resolve_name(input, tables)
            .ok_or_else(|| CronError::InvalidMnemonicValue(token(input).to_owned()))?;

        let value = match (self, bound, index) {
            (Self::Dows, Bound::Upper, 0) => 7,
            _ => index + shift,
        };

        Ok((value, &input[len..]))
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::Doms => "day of month",
            Self::Months => "month",
            Self::Dows => "day of week",
        };
        write!(f, "{name}")
    }
}

/// Set of values of a single schedule field: one bit per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ScheduleField {
    kind: FieldKind,
    bits: u64,
}

impl ScheduleField {
    /// Field without any value, never matches.
    pub(crate) fn empty(kind: FieldKind) -> Self {
        Self { kind, bits: 0 }
    }

    /// Parses comma-separated list of terms from the start of `input` and returns the field
    /// with the rest of the input. Leading blanks are skipped.
    pub(crate) fn parse(kind: FieldKind, input: &str) -> Result<(Self, &str)> {
        let (min, max) = kind.min_max();
        let mut field = Self::empty(kind);
        let mut rest = utils::skip_blanks(input);

        if utils::is_eol(rest) {
            return Err(CronError::InvalidCronSchedule(format!("missing {kind} field")));
        }

        loop {
            let term = rest;
            let (first, last, tail) = if let Some(tail) = rest.strip_prefix('*') {
                (min, max, tail)
            } else {
                let (first, tail) = kind.read_value(rest, Bound::Lower)?;
                if let Some(tail) = tail.strip_prefix('-') {
                    let (last, tail) = kind.read_value(tail, Bound::Upper)?;
                    (first, last, tail)
                } else {
                    (first, first, tail)
                }
            };

            let (step, tail) = if let Some(tail) = tail.strip_prefix('/') {
                read_step(tail, max)?
            } else {
                (1, tail)
            };

            if first < min || first > max || last < min || last > max {
                let consumed = &term[..term.len() - tail.len()];
                return Err(CronError::InvalidRangeValue(format!("{kind} {consumed}")));
            }

            // Reversed range doesn't wrap around, it adds nothing.
            if first <= last {
                for value in SeriesWithStep::new(first, last, step) {
                    field.bits |= 1 << value;
                }
            }

            match tail.strip_prefix(',') {
                Some(tail) => rest = tail,
                None => return Ok((field, tail)),
            }
        }
    }

    /// Sets Sunday as `0` if it was specified as `7` and drops `7` from the field.
    pub(crate) fn fold_sunday(mut self) -> Self {
        if self.contains(7) {
            self.bits |= 1;
            self.bits &= !(1 << 7);
        }
        self
    }

    #[inline]
    pub(crate) fn contains(&self, value: FieldValue) -> bool {
        value < 64 && self.bits & (1 << value) != 0
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if every value of the domain is present.
    pub(crate) fn is_saturated(&self) -> bool {
        let (min, _) = self.kind.min_max();
        (min..=self.kind.saturated_max()).all(|value| self.contains(value))
    }

    /// Iterates over values present in the field, ascending.
    pub(crate) fn values(&self) -> impl Iterator<Item = FieldValue> + '_ {
        let (min, max) = self.kind.min_max();
        (min..=max).filter(|value| self.contains(*value))
    }
}

/// Renders `*` for saturated fields, otherwise comma-separated runs like `1-5,10,20-22`.
/// Empty field is rendered as a reversed range, which parses back to nothing.
impl Display for ScheduleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_saturated() {
            return write!(f, "*");
        }

        if self.is_empty() {
            let (min, max) = self.kind.min_max();
            return write!(f, "{max}-{min}");
        }

        let mut runs: Vec<(FieldValue, FieldValue)> = vec![];
        for value in self.values() {
            match runs.last_mut() {
                Some((_, last)) if *last + 1 == value => *last = value,
                _ => runs.push((value, value)),
            }
        }

        let runs = runs
            .iter()
            .map(|(first, last)| {
                if first == last {
                    first.to_string()
                } else {
                    format!("{first}-{last}")
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{runs}")
    }
}

/// Leading run of characters which may form a single value, for error messages.
fn token(input: &str) -> &str {
    let len = input
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(input.len());
    &input[..len]
}

/// Reads unsigned decimal number from the start of `input`.
fn read_number(input: &str) -> Result<(FieldValue, &str)> {
    let len = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, rest) = input.split_at(len);

    digits
        .parse::<FieldValue>()
        .map(|value| (value, rest))
        .map_err(|_| CronError::InvalidDigitalValue(token(input).to_owned()))
}

/// Reads step value after `/`. Steps beyond the domain are cut down since they
/// can't produce more than the first value anyway.
fn read_step(input: &str, max: FieldValue) -> Result<(FieldValue, &str)> {
    let len = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, rest) = input.split_at(len);

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => Err(CronError::InvalidRepeatingPattern(format!("/{}", token(input)))),
        Ok(step) => Ok((step.min(max as u32 + 1) as FieldValue, rest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rstest_reuse::{self, apply, template};

    fn parse_values(kind: FieldKind, input: &str) -> Vec<FieldValue> {
        let (field, rest) = ScheduleField::parse(kind, input).unwrap();
        assert!(rest.is_empty(), "kind = {kind:?}, input = {input}, rest = {rest}");
        field.values().collect()
    }

    #[template]
    #[rstest]
    #[case(FieldKind::Minutes)]
    #[case(FieldKind::Hours)]
    #[case(FieldKind::Doms)]
    #[case(FieldKind::Months)]
    #[case(FieldKind::Dows)]
    fn all_kinds(#[case] kind: FieldKind) {}

    #[apply(all_kinds)]
    fn test_every_single_value(kind: FieldKind) {
        let (min, max) = kind.min_max();
        for value in min..=max {
            assert_eq!(parse_values(kind, &value.to_string()), vec![value], "kind = {kind:?}");
        }
    }

    #[apply(all_kinds)]
    fn test_asterisk_is_whole_domain(kind: FieldKind) {
        let (min, max) = kind.min_max();
        let (field, _) = ScheduleField::parse(kind, "*").unwrap();
        assert_eq!(field.values().collect::<Vec<_>>(), (min..=max).collect::<Vec<_>>());
        assert!(field.is_saturated());
    }

    #[apply(all_kinds)]
    fn test_step_one_is_plain_range(kind: FieldKind) {
        let (min, max) = kind.min_max();
        let plain = ScheduleField::parse(kind, &format!("{min}-{max}")).unwrap().0;
        let stepped = ScheduleField::parse(kind, &format!("{min}-{max}/1")).unwrap().0;
        assert_eq!(plain, stepped);
    }

    #[apply(all_kinds)]
    fn test_step_two(kind: FieldKind) {
        let (min, max) = kind.min_max();
        let expected = (min..=max).step_by(2).collect::<Vec<_>>();
        assert_eq!(parse_values(kind, &format!("{min}-{max}/2")), expected);
        assert_eq!(parse_values(kind, "*/2"), expected);
    }

    #[rstest]
    #[case(FieldKind::Minutes, "0,15,30,45", vec![0, 15, 30, 45])]
    #[case(FieldKind::Minutes, "45,0,30,15", vec![0, 15, 30, 45])]
    #[case(FieldKind::Minutes, "10-30/5", vec![10, 15, 20, 25, 30])]
    #[case(FieldKind::Minutes, "50-59/10", vec![50])]
    #[case(FieldKind::Minutes, "0-59/100", vec![0])]
    #[case(FieldKind::Minutes, "10,12,20-30/5,40-42", vec![10, 12, 20, 25, 30, 40, 41, 42])]
    #[case(FieldKind::Minutes, "007", vec![7])]
    #[case(FieldKind::Hours, "*/6", vec![0, 6, 12, 18])]
    #[case(FieldKind::Hours, "9-17", (9..=17).collect::<Vec<_>>())]
    #[case(FieldKind::Doms, "*/10", vec![1, 11, 21, 31])]
    #[case(FieldKind::Doms, "1,15", vec![1, 15])]
    #[case(FieldKind::Months, "jan", vec![1])]
    #[case(FieldKind::Months, "Jan", vec![1])]
    #[case(FieldKind::Months, "January", vec![1])]
    #[case(FieldKind::Months, "jun-aug", vec![6, 7, 8])]
    #[case(FieldKind::Months, "MAR-dec/3", vec![3, 6, 9, 12])]
    #[case(FieldKind::Months, "feb,11,oct", vec![2, 10, 11])]
    #[case(FieldKind::Dows, "su", vec![0])]
    #[case(FieldKind::Dows, "Sun", vec![0])]
    #[case(FieldKind::Dows, "mon-fri", vec![1, 2, 3, 4, 5])]
    #[case(FieldKind::Dows, "fri-sun", vec![5, 6, 7])]
    #[case(FieldKind::Dows, "sun-sat", vec![0, 1, 2, 3, 4, 5, 6])]
    #[case(FieldKind::Dows, "5-7", vec![5, 6, 7])]
    #[case(FieldKind::Dows, "Sat,SUN", vec![0, 6])]
    // Reversed ranges contribute nothing.
    #[case(FieldKind::Minutes, "5-1", vec![])]
    #[case(FieldKind::Minutes, "5-1,3", vec![3])]
    #[case(FieldKind::Hours, "23-0", vec![])]
    #[case(FieldKind::Hours, "23-0/2,12", vec![12])]
    #[case(FieldKind::Doms, "31-1", vec![])]
    #[case(FieldKind::Months, "dec-jan", vec![])]
    #[case(FieldKind::Months, "dec-jan,jun", vec![6])]
    #[case(FieldKind::Dows, "5-1,3", vec![3])]
    #[case(FieldKind::Dows, "fri-mon", vec![])]
    fn test_parse_valid(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: Vec<FieldValue>) {
        assert_eq!(parse_values(kind, input), expected, "kind = {kind:?}, input = {input}");
    }

    #[rstest]
    #[case(FieldKind::Minutes, "5 4 3", " 4 3")]
    #[case(FieldKind::Minutes, " \t*/5 *", " *")]
    #[case(FieldKind::Months, "jan#", "#")]
    #[case(FieldKind::Doms, "15W", "W")]
    #[case(FieldKind::Dows, "5L", "L")]
    #[case(FieldKind::Dows, "1-5echo", "echo")]
    #[case(FieldKind::Dows, "7\n", "\n")]
    fn test_parse_returns_rest(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: &str) {
        let (_, rest) = ScheduleField::parse(kind, input).unwrap();
        assert_eq!(rest, expected);
    }

    #[rstest]
    #[case(FieldKind::Minutes, vec!["", " ", "\n", ",", "/", "-", "60", "1-60", "5-", "1,", ",1", "1,,2", "*/", "*/0", "*/x", "1-", "-1", "a", "jan", "256", "99999"])]
    #[case(FieldKind::Hours, vec!["24", "0-24", "23-24", "*/0", "mon"])]
    #[case(FieldKind::Doms, vec!["0", "32", "0-5", "31-0", "L", "?"])]
    #[case(FieldKind::Months, vec!["0", "13", "dec-13", "invalid", "@jan", "feb/x"])]
    #[case(FieldKind::Dows, vec!["8", "0-8", "sun-mon/0", "xyz", "#2", "mon-"])]
    fn test_parse_invalid(#[case] kind: FieldKind, #[case] input: Vec<&str>) {
        for item in input {
            let r = ScheduleField::parse(kind, item);
            assert!(r.is_err(), "kind = {kind:?}, input = '{item}', parsed = {r:?}");
        }
    }

    #[rstest]
    #[case("7", vec![0])]
    #[case("0", vec![0])]
    #[case("0,7", vec![0])]
    #[case("5-7", vec![0, 5, 6])]
    #[case("1-3", vec![1, 2, 3])]
    fn test_fold_sunday(#[case] input: &str, #[case] expected: Vec<FieldValue>) {
        let (field, _) = ScheduleField::parse(FieldKind::Dows, input).unwrap();
        assert_eq!(field.fold_sunday().values().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    #[case("0-7", true)]
    #[case("1-7", true)]
    #[case("0-6", true)]
    #[case("*", true)]
    #[case("1-6", false)]
    #[case("mon-sun", true)]
    fn test_folded_dows_saturation(#[case] input: &str, #[case] expected: bool) {
        let (field, _) = ScheduleField::parse(FieldKind::Dows, input).unwrap();
        assert_eq!(field.fold_sunday().is_saturated(), expected, "input = {input}");
    }

    #[rstest]
    #[case(FieldKind::Minutes, "*", "*")]
    #[case(FieldKind::Minutes, "0-59", "*")]
    #[case(FieldKind::Minutes, "*/15", "0,15,30,45")]
    #[case(FieldKind::Minutes, "1,2,3,10,20-22", "1-3,10,20-22")]
    #[case(FieldKind::Doms, "1-30", "1-30")]
    #[case(FieldKind::Months, "jan-mar,dec", "1-3,12")]
    #[case(FieldKind::Dows, "mon-fri", "1-5")]
    #[case(FieldKind::Minutes, "5-1", "59-0")]
    #[case(FieldKind::Doms, "31-1", "31-1")]
    #[case(FieldKind::Months, "dec-jan", "12-1")]
    fn test_display(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: &str) {
        let (field, _) = ScheduleField::parse(kind, input).unwrap();
        assert_eq!(field.to_string(), expected);
    }

    #[test]
    fn test_empty_field() {
        let field = ScheduleField::empty(FieldKind::Hours);
        assert!(field.is_empty());
        assert!(!field.is_saturated());
        assert_eq!(field.values().count(), 0);
        assert!(!field.contains(0));
        assert_eq!(field.to_string(), "23-0");

        let (parsed, _) = ScheduleField::parse(FieldKind::Hours, &field.to_string()).unwrap();
        assert_eq!(parsed, field);
    }
}
