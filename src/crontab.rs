use crate::{utils, CivilInstant, Schedule, Upcoming};
use tracing::debug;

/// Single crontab line: when, on behalf of whom and what to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    schedule: Schedule,
    owner: String,
    command: String,
}

impl Entry {
    /// Constructs an entry from its parts.
    pub fn new(schedule: Schedule, owner: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            schedule,
            owner: owner.into(),
            command: command.into(),
        }
    }

    /// Schedule of the entry.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// User the command runs as.
    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Command text, exactly as written in the crontab.
    #[inline]
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Ordered list of entries collected from one or more crontab sources.
///
/// Every new source goes in front of the entries already collected, and lines of a single source
/// are kept in reverse order. This order decides which entry is reported first when several of them
/// fire at the same minute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crontab {
    entries: Vec<Entry>,
}

impl Crontab {
    /// Constructs an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a list from a single crontab source, see [`add_entries`](Crontab::add_entries).
    pub fn parse(text: &str, owner: Option<&str>) -> Self {
        let mut crontab = Self::new();
        crontab.add_entries(text, owner);
        crontab
    }

    /// Parses crontab `text` and puts its entries in front of the existing ones.
    ///
    /// If `owner` is provided, it's used for every entry (personal crontab format), otherwise
    /// each line carries the owner column right after the schedule (system crontab format).
    /// Blank lines, comments and lines which can't be parsed are skipped.
    ///
    /// Returns the number of added entries.
    pub fn add_entries(&mut self, text: &str, owner: Option<&str>) -> usize {
        let mut added = vec![];
        let mut rest = text;

        loop {
            let line = utils::skip_irrelevant(rest);
            if line.is_empty() {
                break;
            }

            match Schedule::parse(line) {
                Ok((schedule, tail)) => {
                    let (entry, tail) = Self::read_entry(schedule, tail, owner);
                    added.push(entry);
                    rest = utils::next_line(tail);
                }
                Err(err) => {
                    let text = line.lines().next().unwrap_or_default();
                    debug!(line = text, error = %err, "skipping crontab line");
                    rest = utils::next_line(line);
                }
            }
        }

        let count = added.len();
        added.reverse();
        self.entries.splice(0..0, added);

        count
    }

    fn read_entry<'a>(schedule: Schedule, input: &'a str, owner: Option<&str>) -> (Entry, &'a str) {
        let mut rest = utils::skip_blanks(input);

        let owner = match owner {
            Some(owner) => owner.to_owned(),
            None => {
                let len = rest
                    .find(|c: char| !c.is_ascii_alphanumeric())
                    .unwrap_or(rest.len());
                let (owner, tail) = rest.split_at(len);
                rest = utils::skip_blanks(tail);
                owner.to_owned()
            }
        };

        let len = rest.find('\n').unwrap_or(rest.len());
        let (command, rest) = rest.split_at(len);

        (Entry::new(schedule, owner, command), rest)
    }

    /// Entries in matching order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over upcoming actions, starting from (and including) the `start` minute.
    ///
    /// Without bounds, the sequence ends only if nothing fires within about a year.
    /// Use [`limit`](Upcoming::limit) and [`until`](Upcoming::until) to bound it.
    pub fn upcoming(&self, start: CivilInstant) -> Upcoming<'_> {
        Upcoming::new(&self.entries, start)
    }
}

impl<'a> IntoIterator for &'a Crontab {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
