use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://terminal-ai-api.vercel.app/api";

const CONFIG_DIR_NAME: &str = ".terminal-ai";
const HISTORY_FILE_NAME: &str = "history.json";

/// Process-lifetime configuration, resolved once at startup and passed
/// explicitly to each pipeline stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub config_dir: PathBuf,
    pub history_path: PathBuf,
    /// Hard deadline for a single network attempt.
    pub request_timeout: Duration,
    pub max_attempts: u32,
    /// Linear backoff unit; attempt N waits N of these before retrying.
    pub backoff_unit: Duration,
}

impl Config {
    pub fn load() -> Self {
        let config_dir = home_dir().join(CONFIG_DIR_NAME);

        // Optional per-user overrides live next to the history file.
        let _ = dotenvy::from_path(config_dir.join(".env"));

        let api_url =
            env::var("TAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let history_path = config_dir.join(HISTORY_FILE_NAME);

        Self {
            api_url,
            config_dir,
            history_path,
            request_timeout: Duration::from_secs(30),
            max_attempts: 3,
            backoff_unit: Duration::from_millis(1000),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
