/// Generator of numbers series.
use std::ops::{Add, AddAssign};

/// Generator (iterator) state: `first, first + step, ...` while not greater than `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SeriesWithStep<T: Copy> {
    last: T,
    step: T,
    next: T,
}

impl<T> SeriesWithStep<T>
where
    T: Copy + Add + AddAssign + PartialOrd,
    <T as Add>::Output: PartialOrd<T>,
{
    /// Caller is responsible to ensure that
    /// maximum serial value (last+step) isn't greater than type's maximum.
    ///
    /// Panics if `last` is less than `first` or `step` is zero.
    #[inline]
    pub(crate) fn new(first: T, last: T, step: T) -> Self {
        if last < first {
            panic!("last value is less than first value");
        }

        if first + step == first {
            panic!("step value is 0");
        }

        Self {
            next: first,
            last,
            step,
        }
    }
}

impl<T> Iterator for SeriesWithStep<T>
where
    T: Copy + Add + AddAssign + PartialOrd,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            None
        } else {
            let current = self.next;
            self.next += self.step;
            Some(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rstest_reuse::{self, apply, template};

    #[template]
    #[rstest]
    #[case(0, 5, 1, vec![0, 1, 2, 3, 4, 5])]
    #[case(0, 5, 2, vec![0, 2, 4])]
    #[case(0, 5, 5, vec![0, 5])]
    #[case(0, 5, 6, vec![0])]
    #[case(1, 31, 10, vec![1, 11, 21, 31])]
    #[case(10, 39, 20, vec![10, 30])]
    #[case(7, 7, 1, vec![7])]
    #[case(0, 59, 60, vec![0])]
    fn series_with_step<T>(#[case] first: T, #[case] last: T, #[case] step: T, #[case] expected: Vec<T>) {}

    #[apply(series_with_step)]
    fn series_with_step_u8(first: u8, last: u8, step: u8, expected: Vec<u8>) {
        assert_eq!(
            SeriesWithStep::<u8>::new(first, last, step).collect::<Vec<u8>>(),
            expected
        );
    }

    #[apply(series_with_step)]
    fn series_with_step_u16(first: u16, last: u16, step: u16, expected: Vec<u16>) {
        assert_eq!(
            SeriesWithStep::<u16>::new(first, last, step).collect::<Vec<u16>>(),
            expected
        );
    }

    #[rstest]
    #[case(10, 5, 1)]
    #[case(0, 5, 0)]
    #[case(5, 5, 0)]
    #[should_panic]
    fn series_should_panic(#[case] first: u8, #[case] last: u8, #[case] step: u8) {
        SeriesWithStep::<u8>::new(first, last, step);
    }
}
