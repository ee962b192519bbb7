//! Shell command execution used as the operation for every subcommand.

use eyre::{Context, Result};
use tokio::process::Command;

/// Placeholder replaced by the current item in command templates.
pub const ITEM_PLACEHOLDER: &str = "{}";

/// Join argv into a single shell command line.
pub fn command_line(argv: &[String]) -> String {
    argv.join(" ")
}

/// Substitute `item` for every placeholder in `template`.
pub fn render(template: &str, item: &str) -> String {
    template.replace(ITEM_PLACEHOLDER, item)
}

/// Run `command` through `sh -c`.
///
/// Exit status 0 is success and yields the trimmed stdout; anything else is
/// an error carrying the exit code and stderr.
pub async fn run_shell(command: &str) -> Result<String> {
    log::debug!("Running: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .context(format!("Failed to spawn `{}`", command))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    if output.status.success() {
        return Ok(stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let code = output
        .status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string());
    eyre::bail!("`{}` exited with {}: {}", command, code, stderr.trim_end())
}
