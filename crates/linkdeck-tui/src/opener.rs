//! Hand URLs to the platform opener.

use std::process::{Command, Stdio};

use tracing::{info, warn};

/// Openers tried in order for the current platform.
#[must_use]
pub fn opener_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["open", "xdg-open"]
    } else {
        &["xdg-open"]
    }
}

pub fn open_url(url: &str) -> Result<(), String> {
    let Some(opener) = opener_candidates()
        .iter()
        .copied()
        .find(|name| command_exists(name))
    else {
        warn!(url, "no url opener available");
        return Err("no supported opener found (tried `open` and `xdg-open`)".to_owned());
    };
    let status = Command::new(opener)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| format!("failed launching `{opener}`: {err}"))?;
    if !status.success() {
        return Err(format!("`{opener}` exited with status {status}"));
    }
    info!(url, opener, "opened url");
    Ok(())
}

fn command_exists(name: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {name} >/dev/null 2>&1"))
        .status()
        .is_ok_and(|status| status.success())
}
