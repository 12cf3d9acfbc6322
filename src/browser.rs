use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Open a local file with the platform's default handler
///
/// Does not wait for the browser to exit.
pub fn open(path: &Path) -> io::Result<()> {
    let path = path.canonicalize()?;
    tracing::debug!("Opening {} in browser", path.display());

    launch(opener(&path)).map(|_| ())
}

/// Spawn `command` with no terminal I/O and reap it on a background thread
fn launch(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(thread::spawn(move || {
        let status = child.wait()?;
        if !status.success() {
            tracing::warn!("Browser opener exited with {}", status);
        }
        Ok(status)
    }))
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
