use crate::domain::error::{DomainError, DomainResult};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace, warn};

pub const ENV_DB_URL: &str = "LINKLOCKER_DB_URL";
pub const ENV_SESSION_FILE: &str = "LINKLOCKER_SESSION_FILE";
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplaySettings {
    /// chrono format string for creation dates (default: "%b %-d, %Y")
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether to print the abbreviated link id on each card (default: true)
    #[serde(default = "default_true")]
    pub show_ids: bool,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            show_ids: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    /// Where the signed-in session is kept between invocations
    #[serde(default = "default_session_file")]
    pub session_file: String,

    #[serde(default)]
    pub display: DisplaySettings,
}

fn config_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/linklocker")
}

fn default_db_path() -> String {
    config_home()
        .join("linklocker.db")
        .to_string_lossy()
        .to_string()
}

fn default_session_file() -> String {
    config_home()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}

/// `~/.config/linklocker/config.toml`
pub fn default_config_path() -> PathBuf {
    config_home().join("config.toml")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            session_file: default_session_file(),
            display: DisplaySettings::default(),
        }
    }
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(e).context(format!("reading {}", path.display())))?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::DeserializationError(format!("Invalid config {}: {}", path.display(), e))
    })
}

/// Load settings: defaults, then the config file, then environment overrides.
///
/// An explicitly given `config_file` must exist and parse. The default location is optional
/// and a broken file there is skipped with a warning.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => read_config_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                trace!("Loading config from: {:?}", path);
                read_config_file(&path).unwrap_or_else(|e| {
                    warn!("{}; falling back to defaults", e);
                    Settings::default()
                })
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(db_url) = std::env::var(ENV_DB_URL) {
        trace!("Using {} from environment: {}", ENV_DB_URL, db_url);
        settings.db_url = db_url;
    }

    if let Ok(session_file) = std::env::var(ENV_SESSION_FILE) {
        trace!("Using {} from environment: {}", ENV_SESSION_FILE, session_file);
        settings.session_file = session_file;
    }

    validate_date_format(&settings.display.date_format)?;

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

/// Reject strftime strings chrono cannot render, e.g. unknown `%` specifiers
pub fn validate_date_format(format: &str) -> DomainResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DomainError::DeserializationError(format!(
            "Invalid [display] date_format '{}'",
            format
        )));
    }
    Ok(())
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
