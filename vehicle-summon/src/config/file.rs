//! Loading and saving the INI configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::report::{ReporterConfig, DEFAULT_ENDPOINT};
use crate::session::{SessionConfig, DEFAULT_EVENT_CHANNEL_CAPACITY};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

/// `[endpoint]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    /// Vehicle URL summon requests are POSTed to.
    pub url: String,
    /// Request timeout in seconds; `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

/// `[map]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSettings {
    /// Start sessions with follow mode on.
    pub follow_on_start: bool,
}

/// `[session]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub event_channel_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

/// Contents of `config.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub endpoint: EndpointSettings,
    pub map: MapSettings,
    pub session: SessionSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.vehicle-summon/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Build the runtime session configuration.
    pub fn to_session_config(&self) -> SessionConfig {
        let mut reporter = ReporterConfig::new(self.endpoint.url.clone());
        if let Some(secs) = self.endpoint.timeout_secs {
            reporter = reporter.with_timeout(Duration::from_secs(secs));
        }

        SessionConfig {
            reporter,
            ..SessionConfig::default()
        }
        .with_follow_on_start(self.map.follow_on_start)
        .with_event_channel_capacity(self.session.event_channel_capacity)
    }
}

/// Path to the config directory (~/.vehicle-summon).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vehicle-summon")
}

/// Path to the config file (~/.vehicle-summon/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
