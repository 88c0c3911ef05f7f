use std::path::Path;

/// Turn the latest assistant text into a one-line notification body of at
/// most `max_chars` characters. Falls back to `fallback` when there is no text.
pub fn notification_message(text: Option<&str>, max_chars: usize, fallback: &str) -> String {
    let body = match text {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    };
    body.replace('\n', " ").chars().take(max_chars).collect()
}

/// Last path component of the working directory, or empty for `/`.
pub fn session_label(cwd: &Path) -> String {
    cwd.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn notification_title(session_label: &str) -> String {
    format!("ClaudeCode ({}) Task Done", session_label)
}
