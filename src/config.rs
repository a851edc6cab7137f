//! Application-level configuration loading, shared by the session server and the game client.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dto::session::MAX_QUESTION_COUNT;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TRIVIA_BACK_CONFIG_PATH";
/// Seconds given to answer a question.
const DEFAULT_TIMER_SECONDS: u32 = 30;
/// Pause inserted before showing the next question.
const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Seed file for the question bank; the built-in bank is used when absent.
    pub questions_path: Option<PathBuf>,
    /// Largest session the server accepts to open.
    pub max_question_count: u32,
    /// Countdown length, in ticks of one second.
    pub timer_seconds: u32,
    /// Whether questions are timed at all.
    pub timer_enabled: bool,
    /// Delay between `next_question` and the display of the next question.
    pub transition_delay: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        timer_seconds = app_config.timer_seconds,
                        timer_enabled = app_config.timer_enabled,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document; missing keys take their default value.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions_path: None,
            max_question_count: MAX_QUESTION_COUNT,
            timer_seconds: DEFAULT_TIMER_SECONDS,
            timer_enabled: true,
            transition_delay: DEFAULT_TRANSITION_DELAY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    questions_path: Option<PathBuf>,
    max_question_count: Option<u32>,
    timer_seconds: Option<u32>,
    timer_enabled: Option<bool>,
    transition_delay_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            questions_path: value.questions_path.filter(|path| !path.as_os_str().is_empty()),
            max_question_count: value
                .max_question_count
                .map(|count| count.clamp(1, MAX_QUESTION_COUNT))
                .unwrap_or(defaults.max_question_count),
            timer_seconds: value
                .timer_seconds
                .filter(|seconds| *seconds > 0)
                .unwrap_or(defaults.timer_seconds),
            timer_enabled: value.timer_enabled.unwrap_or(defaults.timer_enabled),
            transition_delay: value
                .transition_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.transition_delay),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
