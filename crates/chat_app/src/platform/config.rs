//! Optional `chat_widget.ron` settings read from the working directory.
use std::fs;
use std::path::Path;
use std::time::Duration;

use chat_core::WidgetConfig;
use chat_engine::ClientSettings;
use chat_logging::{chat_info, chat_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "chat_widget.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogDestinationSetting {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevelSetting {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelSetting {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevelSetting::Error => log::LevelFilter::Error,
            LogLevelSetting::Warn => log::LevelFilter::Warn,
            LogLevelSetting::Info => log::LevelFilter::Info,
            LogLevelSetting::Debug => log::LevelFilter::Debug,
            LogLevelSetting::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub bot_icon_url: String,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub escape_html: bool,
    pub single_flight: bool,
    pub log_destination: LogDestinationSetting,
    pub log_level: LogLevelSetting,
}

impl Default for AppConfig {
    fn default() -> Self {
        let widget = WidgetConfig::default();
        Self {
            server_url: ClientSettings::default().base_url,
            bot_icon_url: widget.bot_icon_url,
            connect_timeout_ms: None,
            request_timeout_ms: None,
            escape_html: widget.escape_html,
            single_flight: widget.single_flight,
            log_destination: LogDestinationSetting::File,
            log_level: LogLevelSetting::Info,
        }
    }
}

impl AppConfig {
    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            bot_icon_url: self.bot_icon_url.clone(),
            escape_html: self.escape_html,
            single_flight: self.single_flight,
            ..WidgetConfig::default()
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.server_url.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Reads the config file. A missing file is `Ok(None)`.
pub(crate) fn read_config(dir: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}

/// Loads the config, falling back to defaults on any problem.
///
/// Returns the warning to log once logging is up, since the log destination
/// itself comes from this file.
pub(crate) fn load_config(dir: &Path) -> (AppConfig, Option<String>) {
    match read_config(dir) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (AppConfig::default(), None),
        Err(err) => (AppConfig::default(), Some(err.to_string())),
    }
}

pub(crate) fn log_config(config: &AppConfig, warning: Option<&str>) {
    if let Some(warning) = warning {
        chat_warn!("Using default settings: {}", warning);
    }
    chat_info!(
        "Settings: server={} escape_html={} single_flight={}",
        config.server_url,
        config.escape_html,
        config.single_flight
    );
}
