//! Service configuration, resolved from `AUTOSTOP_*` environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 8080;
/// Default local settings database path.
const DEFAULT_DB_PATH: &str = "./data/autostop.db";
/// Default navigation path of the onboarding screen.
pub const DEFAULT_ONBOARDING_PATH: &str = "/onboarding";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Local settings database path. `None` means the environment provides
    /// no persistent key-value storage and the session gate degrades to a
    /// no-op.
    pub db_path: Option<PathBuf>,
    /// External ride fixture path. `None` falls back to the embedded fixture.
    pub rides_path: Option<PathBuf>,
    /// Navigation path of the onboarding screen.
    pub onboarding_path: String,
    /// Public Mapbox token handed to the UI through `/api/config`, if any.
    pub mapbox_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: Some(PathBuf::from(DEFAULT_DB_PATH)),
            rides_path: None,
            onboarding_path: DEFAULT_ONBOARDING_PATH.to_string(),
            mapbox_token: None,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the environment.
    ///
    /// Every variable has a default; setting `AUTOSTOP_DB_PATH` to the empty
    /// string disables persistence entirely.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("AUTOSTOP_PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let db_path = match env::var("AUTOSTOP_DB_PATH") {
            Ok(raw) => optional_path(&raw),
            Err(_) => Some(PathBuf::from(DEFAULT_DB_PATH)),
        };

        let rides_path = env::var("AUTOSTOP_RIDES_PATH")
            .ok()
            .as_deref()
            .and_then(optional_path);

        let onboarding_path = match env::var("AUTOSTOP_ONBOARDING_PATH") {
            Ok(raw) => parse_onboarding_path(&raw)?,
            Err(_) => DEFAULT_ONBOARDING_PATH.to_string(),
        };

        let mapbox_token = env::var("AUTOSTOP_MAPBOX_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            port,
            db_path,
            rides_path,
            onboarding_path,
            mapbox_token,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key: "AUTOSTOP_PORT".to_string(),
        message: format!("{e}"),
    })
}

/// An explicitly empty value means "no path".
fn optional_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// The onboarding path is matched against navigation targets, so it must be
/// an absolute route path.
fn parse_onboarding_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_ONBOARDING_PATH.to_string());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidValue {
            key: "AUTOSTOP_ONBOARDING_PATH".to_string(),
            message: format!("must start with '/', got {trimmed:?}"),
        });
    }
    Ok(trimmed.to_string())
}
