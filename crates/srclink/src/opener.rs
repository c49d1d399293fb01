//! Hand a URL to the platform's default browser

use std::process::{Command, Stdio};

use libsrclink_core::SrclinkError;
use tracing::debug;

/// Overrides the platform opener, e.g. `SRCLINK_BROWSER=firefox`
pub const BROWSER_ENV: &str = "SRCLINK_BROWSER";

pub fn open_url(url: &str) -> Result<(), SrclinkError> {
    let mut cmd = match std::env::var(BROWSER_ENV) {
        Ok(browser) if !browser.trim().is_empty() => {
            let mut cmd = Command::new(browser.trim());
            cmd.arg(url);
            cmd
        }
        _ => platform_command(url),
    };
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!(program = %program, url, "Opening URL");

    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| SrclinkError::Open(format!("failed to run {}: {}", program, e)))?;

    if !status.success() {
        return Err(SrclinkError::Open(format!("{} exited with {}", program, status)));
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(windows)]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    // the empty argument is the window title consumed by `start`
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
