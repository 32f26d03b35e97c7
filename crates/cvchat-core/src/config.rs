use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::panel::PanelTimings;

/// Used when neither the environment nor the config names a service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "CVCHAT_BASE_URL";

/// Returns the default config template (with comments).
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for cvchat configuration and logs.
    //!
    //! CVCHAT_HOME resolution order:
    //! 1. CVCHAT_HOME environment variable (if set)
    //! 2. ~/.config/cvchat (default)

    use std::path::PathBuf;

    pub fn cvchat_home() -> PathBuf {
        if let Ok(home) = std::env::var("CVCHAT_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".cvchat"),
            |h| h.join(".config").join("cvchat"),
        )
    }

    pub fn config_path() -> PathBuf {
        cvchat_home().join("config.toml")
    }

    pub fn logs_dir() -> PathBuf {
        cvchat_home().join("logs")
    }
}

/// Color theme of the chat UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Side panel animation timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub transition_ms: u64,
    pub close_fallback_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let timings = PanelTimings::default();
        Self {
            transition_ms: timings.transition.as_millis() as u64,
            close_fallback_ms: timings.close_fallback.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub chat_path: String,
    pub reset_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    pub request_timeout_secs: u64,
    pub theme: Theme,
    pub log_level: String,
    pub panel: PanelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            chat_path: Self::DEFAULT_CHAT_PATH.to_string(),
            reset_path: Self::DEFAULT_RESET_PATH.to_string(),
            chat_id: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            theme: Theme::default(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            panel: PanelConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_CHAT_PATH: &str = "/api/chat";
    const DEFAULT_RESET_PATH: &str = "/api/session/reset";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the service base URL.
    ///
    /// Order: `cli_override`, then `CVCHAT_BASE_URL`, then the config file,
    /// then [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    /// Returns an error if the chosen URL does not parse.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> Result<String> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        pick_base_url(cli_override, env_url.as_deref(), self.base_url.as_deref())
    }

    /// Configured chat id, else a fresh UUID.
    pub fn resolve_chat_id(&self, cli_override: Option<&str>) -> String {
        cli_override
            .or(self.chat_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string)
    }

    pub fn client_config(&self, base_url: String) -> ClientConfig {
        ClientConfig {
            base_url,
            chat_path: self.chat_path.clone(),
            reset_path: self.reset_path.clone(),
            connect_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }

    pub fn panel_timings(&self) -> PanelTimings {
        PanelTimings {
            transition: Duration::from_millis(self.panel.transition_ms),
            close_fallback: Duration::from_millis(self.panel.close_fallback_ms),
        }
    }

    /// Persists the theme to the default config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or written.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Persists the theme to a specific config file.
    ///
    /// Creates the file from the template if it doesn't exist. Other keys and
    /// comments are preserved.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or written.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["theme"] = value(theme.as_str());

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content atomically (temp file + rename), creating
    /// parent directories as needed.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

fn pick_base_url(
    cli_override: Option<&str>,
    env_url: Option<&str>,
    config_url: Option<&str>,
) -> Result<String> {
    let chosen = [cli_override, env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty());

    match chosen {
        Some(url) => {
            url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
            Ok(url.trim_end_matches('/').to_string())
        }
        None => Ok(DEFAULT_BASE_URL.to_string()),
    }
}
