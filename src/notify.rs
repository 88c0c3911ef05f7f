use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;

/// A fully composed completion notification
#[derive(Debug, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub sound_path: PathBuf,
}

/// Quote a string for use inside an AppleScript string literal
fn applescript_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl Notification {
    fn display_script(&self) -> String {
        format!(
            "display notification {} with title {}",
            applescript_quote(&self.message),
            applescript_quote(&self.title)
        )
    }

    fn osascript_command(&self) -> Command {
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(self.display_script());
        cmd
    }

    fn afplay_command(&self) -> Command {
        let mut cmd = Command::new("afplay");
        cmd.arg(&self.sound_path);
        cmd
    }

    /// Show the notification, then play the sound.
    /// Exit statuses are only logged; failing to spawn either tool is an error.
    pub fn send(&self) -> Result<()> {
        run(self.osascript_command(), "osascript")?;
        run(self.afplay_command(), "afplay")?;
        Ok(())
    }
}

fn run(mut cmd: Command, name: &str) -> Result<()> {
    tracing::debug!(command = name, "spawning");
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run {}", name))?;
    if !status.success() {
        tracing::debug!(command = name, %status, "command exited unsuccessfully");
    }
    Ok(())
}
