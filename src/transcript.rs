use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The `message` object of a transcript line
#[derive(Debug, Deserialize)]
struct Message {
    role: Option<String>,
    /// A list of content blocks for tool-capable turns, sometimes a bare string
    content: Option<Value>,
}

/// Represents a transcript line with message
#[derive(Debug, Deserialize)]
struct TranscriptLine {
    message: Option<Message>,
}

/// Find the text of the last assistant message among the final `tail` lines
/// of a transcript file.
///
/// Returns `Ok(None)` when the file doesn't exist or no line qualifies.
/// I/O failures (including non UTF-8 content) are returned as errors.
pub fn last_assistant_text(transcript_path: &Path, tail: usize) -> Result<Option<String>> {
    if !transcript_path.is_file() {
        return Ok(None);
    }

    let file = File::open(transcript_path)?;
    let lines = tail_lines(BufReader::new(file), tail)?;
    tracing::debug!(
        path = %transcript_path.display(),
        lines = lines.len(),
        "scanning transcript tail"
    );

    let mut latest = None;
    for line in &lines {
        if let Some(text) = assistant_text(line) {
            latest = Some(text);
        }
    }

    Ok(latest)
}

/// Keep at most the last `n` lines of a reader.
fn tail_lines<R: BufRead>(reader: R, n: usize) -> std::io::Result<Vec<String>> {
    // Grows with the input, never sized from `n` up front
    let mut window = VecDeque::with_capacity(n.min(64));
    for line in reader.lines() {
        let line = line?;
        if window.len() == n {
            window.pop_front();
        }
        if n > 0 {
            window.push_back(line);
        }
    }
    Ok(window.into())
}

/// First-block text of an assistant entry, if the line is one and the text is non-empty.
fn assistant_text(line: &str) -> Option<String> {
    let entry = serde_json::from_str::<TranscriptLine>(line).ok()?;
    let message = entry.message?;
    if message.role.as_deref() != Some("assistant") {
        return None;
    }

    // Only the first block is consulted, even when later blocks carry text
    let content = message.content?;
    let text = content.as_array()?.first()?.get("text")?.as_str()?;
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
