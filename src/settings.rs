//! Persistent user settings stored as TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::batch::PushOptions;
use crate::core::{FeedbackTemplate, APP_NAME};

/// Overrides the settings file location
pub const CONFIG_PATH_ENV: &str = "CLASSROOM_REPOS_CONFIG";

/// Keys accepted by [`Settings::get`] and [`Settings::set`]
pub const KEYS: &[&str] = &["filename", "message", "title", "grade", "token"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}' (expected one of: filename, message, title, grade, token)")]
    UnknownKey(String),
    #[error("setting '{0}' cannot be empty")]
    EmptyValue(String),
    #[error("no configuration directory available on this system")]
    NoConfigDir,
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the feedback file inside each repository
    pub filename: String,
    /// Commit message used when delivering feedback
    pub message: String,
    pub title: String,
    pub grade: String,
    /// Fallback token when no keyring is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filename: "GRADING.md".to_string(),
            message: "This project has been graded. The file containing the grade is located in the root directory.".to_string(),
            title: "Feedback".to_string(),
            grade: "Grade: ".to_string(),
            token: None,
        }
    }
}

/// Location of the settings file
pub fn config_path() -> Result<PathBuf, SettingsError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME).join("config.toml"))
        .ok_or(SettingsError::NoConfigDir)
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&config_path()?)
    }

    /// Reads settings from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_error)
    }

    pub fn get(&self, key: &str) -> Result<Option<&str>, SettingsError> {
        let value = match key {
            "filename" => Some(self.filename.as_str()),
            "message" => Some(self.message.as_str()),
            "title" => Some(self.title.as_str()),
            "grade" => Some(self.grade.as_str()),
            "token" => self.token.as_deref(),
            other => return Err(SettingsError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let slot = match key {
            "filename" => &mut self.filename,
            "message" => &mut self.message,
            "title" => &mut self.title,
            "grade" => &mut self.grade,
            "token" => {
                self.token = Some(value.to_string()).filter(|token| !token.is_empty());
                return Ok(());
            }
            other => return Err(SettingsError::UnknownKey(other.to_string())),
        };
        if value.trim().is_empty() && key != "grade" {
            return Err(SettingsError::EmptyValue(key.to_string()));
        }
        *slot = value.to_string();
        Ok(())
    }

    pub fn feedback_template(&self) -> FeedbackTemplate {
        FeedbackTemplate::new(&self.title, &self.grade)
    }

    pub fn push_options(&self) -> PushOptions {
        PushOptions {
            filename: self.filename.clone(),
            message: self.message.clone(),
        }
    }
}
