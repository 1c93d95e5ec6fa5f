//! `cronlist` lists upcoming cron actions from the system crontab and your personal crontab.
mod cli;
mod sources;

use clap::Parser;
use cli::Cli;
use cronlist::Crontab;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())))
        .with_writer(io::stderr)
        .compact()
        .init();

    debug!(?cli, "arguments parsed");

    let limit = cli.limit();
    if limit == Some(0) {
        return Ok(());
    }

    let crontab = read_crontabs(&cli);
    info!(entries = crontab.len(), "crontabs loaded");

    let mut upcoming = crontab.upcoming(cli.from);
    if let Some(limit) = limit {
        upcoming = upcoming.limit(limit);
    }
    if let Some(to) = cli.to {
        upcoming = upcoming.until(to);
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for (at, entry) in upcoming {
        writeln!(out, "{at}  {}  {}", entry.owner(), entry.command())?;
    }
    out.flush()?;

    Ok(())
}

/// Personal crontab goes first, then the system one is put in front of it.
fn read_crontabs(cli: &Cli) -> Crontab {
    let mut crontab = Crontab::new();

    if !cli.system {
        if let Some(text) = sources::personal_crontab() {
            let owner = sources::username();
            let count = crontab.add_entries(&text, Some(&owner));
            debug!(%owner, count, "personal crontab parsed");
        }
    }

    if !cli.crontab {
        if let Some(text) = sources::system_crontab(&cli.system_file) {
            let count = crontab.add_entries(&text, None);
            debug!(path = %cli.system_file.display(), count, "system crontab parsed");
        }
    }

    crontab
}
