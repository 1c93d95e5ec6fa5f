//! Crontab parser and upcoming cron actions previewer.
#![deny(unsafe_code, warnings, missing_docs)]

//! This crate is intended to:
//! - parse crontab files: personal ones (without the owner column) and system ones (with it);
//! - list actions which cron would run in the future, in the order it would run them.
//!
//! _This is not a cron jobs scheduler or runner._ Nothing is executed, and time is simulated,
//! so a preview of the next year takes a fraction of a second.
//!
//! ## Cron schedule format
//!
//! Classic 5-fields format is used: minutes, hours, days of month, months and days of week.
//!
//! | Field        | Allowed values                 | Allowed special characters |
//! |--------------|--------------------------------|----------------------------|
//! | Minutes      | 0-59                           | * , - /                    |
//! | Hours        | 0-23                           | * , - /                    |
//! | Day of Month | 1-31                           | * , - /                    |
//! | Month        | 1-12 or JAN-DEC                | * , - /                    |
//! | Day of Week  | 0-7 (0 or 7 is SUN) or SUN-SAT | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `30-59/2`.
//!
//! Month and weekday names are case-insensitive and may be shortened to any prefix:
//! `Jan`, `january` and `j` are all January, `su` is Sunday.
//!
//! If both day of month and day of week are restricted (neither is `*`), the schedule fires when _either_ of them matches.
//! So `0 0 1 * 1` runs at midnight on the 1st of every month and on every Monday.
//!
//! Also, short aliases are allowed:
//!
//! | Alias                      | Expression    |
//! |----------------------------|---------------|
//! | `@yearly` (or `@annually`) | 0 0 1 1 *     |
//! | `@monthly`                 | 0 0 1 * *     |
//! | `@weekly`                  | 0 0 * * 0     |
//! | `@daily` (or `@midnight`)  | 0 0 * * *     |
//! | `@hourly`                  | 0 * * * *     |
//! | `@reboot`                  | never fires   |
//!
//! ## How to use
//!
//! Collect crontab sources into a [`Crontab`], then walk its [upcoming()](Crontab::upcoming) actions:
//!
//! ```rust
//! use cronlist::{CivilInstant, Crontab, Result};
//!
//! fn preview() -> Result<()> {
//!     let mut crontab = Crontab::new();
//!     crontab.add_entries("*/15 9-17 * * mon-fri ~/bin/check-mail\n", Some("alice"));
//!     crontab.add_entries("17 * * * * root run-parts /etc/cron.hourly\n", None);
//!
//!     let start = CivilInstant::new(2024, 1, 1, 9, 0)?;
//!     for (at, entry) in crontab.upcoming(start).limit(10) {
//!         println!("{at}  {}  {}", entry.owner(), entry.command());
//!     }
//!
//!     Ok(())
//! }
//! # preview().unwrap();
//! ```
//!
//! Single schedule may be parsed and checked directly:
//!
//! ```rust
//! use cronlist::{CivilInstant, Schedule};
//!
//! let schedule = Schedule::new("@weekly").unwrap();
//! assert!(schedule.matches(&CivilInstant::new(2024, 2, 4, 0, 0).unwrap()));
//! assert_eq!(schedule.to_string(), "0 0 * * 0");
//! ```
//!
//! # Feature flags
//! * `cli` (default): builds the `cronlist` binary.
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Schedule`] (as a string), [`Entry`] and [`CivilInstant`] (as structs, with 1-based month).

/// Crontab entries list builder.
pub mod crontab;
/// Crate specific Error implementation.
pub mod error;
mod field;
/// Minute resolution calendar instant.
pub mod instant;
/// Cron schedule parser and matcher.
pub mod schedule;
mod series;
/// Upcoming actions generator.
pub mod upcoming;
mod utils;

// Re-export of public entities.
pub use crontab::{Crontab, Entry};
pub use error::CronError;
pub use instant::CivilInstant;
pub use schedule::{IgnoredDays, Schedule};
pub use upcoming::Upcoming;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
