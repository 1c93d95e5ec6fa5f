use crate::{CivilInstant, Entry};
use std::iter::FusedIterator;
use tracing::debug;

/// Iterator over upcoming actions of a crontab, minute by minute.
///
/// Yields `(instant, entry)` pairs in chronological order; entries firing at the same minute come
/// in the crontab order. Constructed by [`Crontab::upcoming`](crate::Crontab::upcoming).
#[derive(Debug, Clone)]
pub struct Upcoming<'a> {
    entries: &'a [Entry],
    start: CivilInstant,
    current: CivilInstant,
    limit: Option<usize>,
    until: Option<CivilInstant>,
    emitted: usize,
    index: usize,
    done: bool,
}

impl<'a> Upcoming<'a> {
    pub(crate) fn new(entries: &'a [Entry], start: CivilInstant) -> Self {
        Self {
            entries,
            start,
            current: start,
            limit: None,
            until: None,
            emitted: 0,
            index: 0,
            done: false,
        }
    }

    /// Stops after `count` actions, even in the middle of a minute.
    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Stops after the `end` minute, which is included.
    pub fn until(mut self, end: CivilInstant) -> Self {
        self.until = Some(end);
        self
    }

    /// Number of actions yielded so far.
    #[inline]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Returns `true` if the minute which has just been checked ends the sequence.
    fn is_last_minute(&self) -> bool {
        if self.until.is_some_and(|end| self.current >= end) {
            return true;
        }

        if self.emitted == 0 && self.current.is_year_past(&self.start) {
            debug!(start = %self.start, current = %self.current, "nothing fired for a year, giving up");
            return true;
        }

        false
    }
}

impl<'a> Iterator for Upcoming<'a> {
    type Item = (CivilInstant, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.entries.is_empty() {
            self.done = true;
        }

        while !self.done {
            if self.limit.is_some_and(|limit| self.emitted >= limit) {
                self.done = true;
                break;
            }

            while let Some(entry) = self.entries.get(self.index) {
                self.index += 1;
                if entry.schedule().matches(&self.current) {
                    self.emitted += 1;
                    return Some((self.current, entry));
                }
            }

            self.index = 0;
            if self.is_last_minute() {
                self.done = true;
            } else {
                self.current.advance();
            }
        }

        None
    }
}

impl FusedIterator for Upcoming<'_> {}
