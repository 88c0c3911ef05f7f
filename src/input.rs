use serde::Deserialize;

/// Input JSON from Claude Code hook system
#[derive(Debug, Default, Deserialize)]
pub struct HookEvent {
    /// Path to the session's JSONL transcript
    pub transcript_path: Option<String>,
    pub session_id: Option<String>,
    pub hook_event_name: Option<String>,
    pub cwd: Option<String>,
}
