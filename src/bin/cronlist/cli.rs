use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser};
use cronlist::CivilInstant;
use std::path::PathBuf;

const DATETIME_FORMATS: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Number of actions to show if neither `--entries` nor `--to` is given.
pub const DEFAULT_ENTRIES: usize = 10;

/// Lists upcoming cron actions from the system crontab and your personal crontab.
#[derive(Debug, Parser)]
#[command(name = "cronlist", version, about, long_about = None)]
pub struct Cli {
    /// List actions starting on or after DATETIME
    #[arg(short, long, value_name = "DATETIME", default_value = "now", value_parser = parse_datetime)]
    pub from: CivilInstant,

    /// List actions starting on or before DATETIME
    #[arg(short, long, value_name = "DATETIME", value_parser = parse_datetime)]
    pub to: Option<CivilInstant>,

    /// Stop after NUMBER actions [default: 10, unless --to is given]
    #[arg(short = 'n', long, value_name = "NUMBER")]
    pub entries: Option<usize>,

    /// Show the system crontab only
    #[arg(short, long, conflicts_with = "crontab")]
    pub system: bool,

    /// Show your personal crontab only
    #[arg(short, long)]
    pub crontab: bool,

    /// Path to the system crontab
    #[arg(long, value_name = "PATH", default_value = "/etc/crontab")]
    pub system_file: PathBuf,

    /// Increase logging verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Maximum number of actions to show, if any.
    pub fn limit(&self) -> Option<usize> {
        match (self.entries, self.to) {
            (Some(entries), _) => Some(entries),
            (None, None) => Some(DEFAULT_ENTRIES),
            (None, Some(_)) => None,
        }
    }

    /// Default log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parses `now`, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`, optionally with seconds.
/// Seconds are ignored.
pub fn parse_datetime(input: &str) -> Result<CivilInstant, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("now") {
        return Ok(CivilInstant::now());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(datetime.into());
        }
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(CivilInstant::from)
        .ok_or_else(|| format!("unsupported date `{input}`, expected `now` or YYYY-MM-DD[ HH:MM[:SS]]"))
}
