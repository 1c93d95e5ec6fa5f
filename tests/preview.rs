use cronlist::{CivilInstant, Crontab, Result};

const PERSONAL: &str = "\
# edit this file to introduce tasks to be run by cron.
MAILTO=alice@example.com
*/20 9-10 * * mon-fri ~/bin/check-mail
0 12 * * *            ~/bin/lunch-reminder
this line is broken
";

const SYSTEM: &str = "\
SHELL=/bin/sh
# m h dom mon dow user  command
17 *  * * *  root  cd / && run-parts --report /etc/cron.hourly
0 10  1 * *  root  /usr/local/bin/monthly-report
";

fn preview(crontab: &Crontab, start: CivilInstant, limit: usize) -> Vec<String> {
    crontab
        .upcoming(start)
        .limit(limit)
        .map(|(at, entry)| format!("{at}  {}  {}", entry.owner(), entry.command()))
        .collect()
}

#[test]
fn personal_and_system() -> Result<()> {
    let mut crontab = Crontab::new();
    assert_eq!(crontab.add_entries(PERSONAL, Some("alice")), 2);
    assert_eq!(crontab.add_entries(SYSTEM, None), 2);

    // 2024-03-01 is Friday.
    let lines = preview(&crontab, CivilInstant::new(2024, 3, 1, 9, 0)?, 9);
    assert_eq!(
        lines,
        vec![
            "2024-03-01  9:00  alice  ~/bin/check-mail",
            "2024-03-01  9:17  root  cd / && run-parts --report /etc/cron.hourly",
            "2024-03-01  9:20  alice  ~/bin/check-mail",
            "2024-03-01  9:40  alice  ~/bin/check-mail",
            "2024-03-01 10:00  root  /usr/local/bin/monthly-report",
            "2024-03-01 10:00  alice  ~/bin/check-mail",
            "2024-03-01 10:17  root  cd / && run-parts --report /etc/cron.hourly",
            "2024-03-01 10:20  alice  ~/bin/check-mail",
            "2024-03-01 10:40  alice  ~/bin/check-mail",
        ]
    );

    Ok(())
}

#[test]
fn weekend_skips_weekday_entries() -> Result<()> {
    let crontab = Crontab::parse(PERSONAL, Some("alice"));

    // 2024-03-02 is Saturday.
    let lines = preview(&crontab, CivilInstant::new(2024, 3, 2, 0, 0)?, 3);
    assert_eq!(
        lines,
        vec![
            "2024-03-02 12:00  alice  ~/bin/lunch-reminder",
            "2024-03-03 12:00  alice  ~/bin/lunch-reminder",
            "2024-03-04  9:00  alice  ~/bin/check-mail",
        ]
    );

    Ok(())
}

#[test]
fn bounded_by_end() -> Result<()> {
    let crontab = Crontab::parse(SYSTEM, None);
    let start = CivilInstant::new(2024, 12, 31, 23, 0)?;
    let end = CivilInstant::new(2025, 1, 1, 10, 0)?;

    let result = crontab
        .upcoming(start)
        .until(end)
        .map(|(at, _)| at)
        .collect::<Vec<_>>();

    assert_eq!(result.len(), 12);
    assert_eq!(result[0], CivilInstant::new(2024, 12, 31, 23, 17)?);
    assert_eq!(result[1], CivilInstant::new(2025, 1, 1, 0, 17)?);
    assert_eq!(result[11], CivilInstant::new(2025, 1, 1, 10, 0)?);

    Ok(())
}

#[test]
fn nothing_to_run() -> Result<()> {
    let crontab = Crontab::parse("@reboot root /sbin/start-daemon\n0 0 30 2 * root never\n", None);
    assert_eq!(crontab.len(), 2);
    assert_eq!(crontab.upcoming(CivilInstant::new(2024, 1, 1, 0, 0)?).count(), 0);

    Ok(())
}
