use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.yaml";
const CONFIG_ENV: &str = "NOTIFY_END_CONFIG";

/// Upper bound for `max_message_chars`; notification bodies never exceed this
pub const MESSAGE_CHARS_LIMIT: usize = 60;
/// Upper bound for `tail_lines`
pub const TAIL_LINES_LIMIT: usize = 1000;

/// Settings for the completion notification. Every field has a default, so
/// the config file is optional and may set any subset of keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sound name, resolved to `<sound_dir>/<sound>.aiff`
    pub sound: String,
    pub sound_dir: PathBuf,
    /// Message shown when the transcript has no usable assistant text
    pub fallback_message: String,
    pub max_message_chars: usize,
    /// Number of trailing transcript lines to scan
    pub tail_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound: "Glass".to_string(),
            sound_dir: PathBuf::from("/System/Library/Sounds"),
            fallback_message: "Task completed".to_string(),
            max_message_chars: MESSAGE_CHARS_LIMIT,
            tail_lines: 10,
        }
    }
}

impl Config {
    pub fn sound_path(&self) -> PathBuf {
        self.sound_dir.join(format!("{}.aiff", self.sound))
    }
}

/// Get the config path: $NOTIFY_END_CONFIG, else $XDG_CONFIG_HOME/notify-end/config.yaml
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });

    xdg_config.join("notify-end").join(CONFIG_FILENAME)
}

fn validate(config: &Config, config_path: &Path) -> Result<()> {
    if config.sound.is_empty() {
        bail!("Invalid config at {}: 'sound' is empty", config_path.display());
    }
    if config.fallback_message.is_empty() {
        bail!(
            "Invalid config at {}: 'fallback_message' is empty",
            config_path.display()
        );
    }
    if !(1..=MESSAGE_CHARS_LIMIT).contains(&config.max_message_chars) {
        bail!(
            "Invalid config at {}: 'max_message_chars' must be between 1 and {}",
            config_path.display(),
            MESSAGE_CHARS_LIMIT
        );
    }
    if !(1..=TAIL_LINES_LIMIT).contains(&config.tail_lines) {
        bail!(
            "Invalid config at {}: 'tail_lines' must be between 1 and {}",
            config_path.display(),
            TAIL_LINES_LIMIT
        );
    }
    Ok(())
}

/// Loads the config file at `config_path`, or defaults when it doesn't exist.
pub fn load_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    // An empty YAML document deserializes as unit, not as an empty map
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    validate(&config, config_path)?;
    Ok(config)
}
