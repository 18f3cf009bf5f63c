use crate::error::config::ConfigError;
use crate::{DEFAULT_USER_AGENT, OSM_API_BASE_URL};

use common::{ErrorLocation, RedactedToken};

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "osm-client.toml";
const CONFIG_DIR_NAME: &str = "osm-fetch";

pub const ENV_API_URL: &str = "OSM_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "OSM_TIMEOUT_SECS";
pub const ENV_ACCESS_TOKEN: &str = "OSM_ACCESS_TOKEN";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// OAuth2 bearer token. Public read endpoints work without one.
    #[serde(default)]
    pub access_token: Option<RedactedToken>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            access_token: None,
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_api_url() -> String {
    OSM_API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Platform config directory, e.g. `~/.config/osm-fetch` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Load config from {config_dir}/osm-client.toml.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config = Self::load_from_path(&config_path)?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: ClientConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse {}: {}", path.display(), e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        if config.access_token.as_ref().is_some_and(RedactedToken::is_empty) {
            warn!("access_token in {} is empty, ignoring", path.display());
            config.access_token = None;
        }

        config.validate()?;

        Ok(config)
    }

    /// Override fields from `OSM_API_URL`, `OSM_TIMEOUT_SECS` and `OSM_ACCESS_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override is malformed.
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = env::var(ENV_API_URL) {
            debug!("Using {ENV_API_URL} override: {url}");
            self.api_url = url;
        }

        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"),
            })?;
        }

        if let Ok(token) = env::var(ENV_ACCESS_TOKEN) {
            let token = RedactedToken::new(token);
            if token.is_empty() {
                warn!("{ENV_ACCESS_TOKEN} is set but empty, ignoring");
            } else {
                debug!("Using access token from {ENV_ACCESS_TOKEN} ({} chars)", token.len());
                self.access_token = Some(token);
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "api_url cannot be empty string".to_string(),
            });
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL format: {}", self.api_url),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "user_agent cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
