use std::{env, fs, io, path::Path, process::Command};
use tracing::{debug, warn};

/// Output of `crontab -l` for the invoking user. Missing crontab or failed command gives nothing.
pub fn personal_crontab() -> Option<String> {
    let text = run("crontab", &["-l"]);
    if text.is_none() {
        debug!("no personal crontab");
    }
    text
}

/// Content of the system crontab. Missing or unreadable file gives nothing.
pub fn system_crontab(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "system crontab doesn't exist");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unable to read system crontab");
            None
        }
    }
}

/// Name of the invoking user, or their numeric id if the name is unknown.
///
/// The user database is asked first, `USER` and `LOGNAME` are used only if `id` isn't available.
pub fn username() -> String {
    run("id", &["-un"])
        .or_else(|| run("id", &["-u"]))
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .or_else(|| {
            ["USER", "LOGNAME"]
                .iter()
                .filter_map(|name| env::var(name).ok())
                .map(|value| value.trim().to_owned())
                .find(|value| !value.is_empty())
        })
        .unwrap_or_else(|| "?".to_owned())
}

/// Runs a command and returns its standard output if it succeeded.
fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(err) => {
            debug!(program, error = %err, "unable to run command");
            return None;
        }
    };

    if !output.status.success() {
        debug!(program, status = %output.status, "command failed");
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
