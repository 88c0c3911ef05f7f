use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

mod config;
mod input;
mod logging;
mod message;
mod notify;
mod transcript;

use config::Config;
use input::HookEvent;
use notify::Notification;

const DRY_RUN_ENV: &str = "NOTIFY_END_DRY_RUN";

fn main() -> Result<()> {
    logging::init();

    let input = read_input()?;
    tracing::info!(
        event = input.hook_event_name.as_deref().unwrap_or("None"),
        session = input.session_id.as_deref().unwrap_or("None"),
        cwd = input.cwd.as_deref().unwrap_or("None"),
        "hook invoked"
    );

    let config = config::load_config(&config::config_path())?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let notification = build_notification(&input, &cwd, &config);
    tracing::info!(
        title = %notification.title,
        message = %notification.message,
        "notifying"
    );

    if dry_run() {
        let json = serde_json::to_string(&notification)?;
        #[allow(clippy::print_stdout)]
        {
            println!("{}", json);
        }
        return Ok(());
    }

    notification.send()
}

/// Compose the notification for this hook event.
fn build_notification(input: &HookEvent, cwd: &Path, config: &Config) -> Notification {
    let text = latest_assistant_text(input, config);
    let label = message::session_label(cwd);

    Notification {
        title: message::notification_title(&label),
        message: message::notification_message(
            text.as_deref(),
            config.max_message_chars,
            &config.fallback_message,
        ),
        sound_path: config.sound_path(),
    }
}

/// Latest assistant text from the transcript. Any read failure means no text.
fn latest_assistant_text(input: &HookEvent, config: &Config) -> Option<String> {
    let path = input.transcript_path.as_deref().filter(|p| !p.is_empty())?;

    match transcript::last_assistant_text(Path::new(path), config.tail_lines) {
        Ok(text) => {
            tracing::debug!(path, found = text.is_some(), "transcript scanned");
            text
        }
        Err(e) => {
            tracing::debug!(path, error = %e, "failed to read transcript, using fallback");
            None
        }
    }
}

fn dry_run() -> bool {
    std::env::var(DRY_RUN_ENV)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

fn read_input() -> Result<HookEvent> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read hook input")?;
    let input: HookEvent =
        serde_json::from_str(&buffer).context("Failed to parse hook input")?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn event_for(path: &Path) -> HookEvent {
        HookEvent {
            transcript_path: Some(path.to_string_lossy().to_string()),
            ..HookEvent::default()
        }
    }

    #[test]
    fn test_no_transcript_path_uses_fallback() {
        let notification = build_notification(
            &HookEvent::default(),
            Path::new("/home/me/src/webapp"),
            &Config::default(),
        );
        assert_eq!(notification.message, "Task completed");
        assert_eq!(notification.title, "ClaudeCode (webapp) Task Done");
        assert_eq!(
            notification.sound_path,
            Path::new("/System/Library/Sounds/Glass.aiff")
        );
    }

    #[test]
    fn test_empty_transcript_path_uses_fallback() {
        let input = HookEvent {
            transcript_path: Some(String::new()),
            ..HookEvent::default()
        };
        let notification = build_notification(&input, Path::new("/tmp"), &Config::default());
        assert_eq!(notification.message, "Task completed");
    }

    #[test]
    fn test_missing_transcript_uses_fallback() {
        let input = event_for(Path::new("/nonexistent/t.jsonl"));
        let notification = build_notification(&input, Path::new("/tmp"), &Config::default());
        assert_eq!(notification.message, "Task completed");
    }

    #[test]
    fn test_assistant_message_from_transcript() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.jsonl");
        fs::write(
            &path,
            "{\"message\": {\"role\": \"assistant\", \"content\": [{\"text\": \"Done!\\nAll tests pass.\"}]}}\n",
        )
        .unwrap();

        let notification =
            build_notification(&event_for(&path), Path::new("/tmp"), &Config::default());
        assert_eq!(notification.message, "Done! All tests pass.");
    }

    #[test]
    fn test_unreadable_transcript_uses_fallback() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.jsonl");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        let notification =
            build_notification(&event_for(&path), Path::new("/tmp"), &Config::default());
        assert_eq!(notification.message, "Task completed");
    }

    #[test]
    fn test_configured_fallback_and_sound() {
        let config = Config {
            sound: "Ping".to_string(),
            fallback_message: "All done".to_string(),
            ..Config::default()
        };
        let notification = build_notification(&HookEvent::default(), Path::new("/tmp"), &config);
        assert_eq!(notification.message, "All done");
        assert_eq!(
            notification.sound_path,
            Path::new("/System/Library/Sounds/Ping.aiff")
        );
    }
}
