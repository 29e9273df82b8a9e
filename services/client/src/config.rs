//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_API_URL: &str = "https://steelhacks2025-skimmly-backend.onrender.com";
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub identity_url: String,
    pub firestore_url: String,
    pub firebase_api_key: Option<String>,
    pub firebase_project_id: Option<String>,
    pub token_path: PathBuf,
    pub score_poll_interval: Duration,
    pub clear_token_on_sign_out: bool,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Remote Services ---
        let api_url = trim_slash(var_or("SKIMMLY_API_URL", DEFAULT_API_URL));
        let identity_url = trim_slash(var_or("FIREBASE_AUTH_URL", DEFAULT_IDENTITY_URL));
        let firestore_url = trim_slash(var_or("FIRESTORE_URL", DEFAULT_FIRESTORE_URL));
        let firebase_api_key = lookup("FIREBASE_API_KEY").filter(|v| !v.is_empty());
        let firebase_project_id = lookup("FIREBASE_PROJECT_ID").filter(|v| !v.is_empty());

        // --- Local Session ---
        let token_path = match lookup("SKIMMLY_TOKEN_PATH").filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_token_path()
                .ok_or_else(|| ConfigError::MissingVar("SKIMMLY_TOKEN_PATH".to_string()))?,
        };

        let poll_str = var_or("SCORE_POLL_INTERVAL_MS", "2000");
        let poll_ms = poll_str
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SCORE_POLL_INTERVAL_MS".to_string(),
                    format!("'{}' is not a positive number of milliseconds", poll_str),
                )
            })?;

        let clear_str = var_or("CLEAR_TOKEN_ON_SIGN_OUT", "false");
        let clear_token_on_sign_out = match clear_str.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(ConfigError::InvalidValue(
                    "CLEAR_TOKEN_ON_SIGN_OUT".to_string(),
                    format!("'{}' is not a boolean", clear_str),
                ))
            }
        };

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_url,
            identity_url,
            firestore_url,
            firebase_api_key,
            firebase_project_id,
            token_path,
            score_poll_interval: Duration::from_millis(poll_ms),
            clear_token_on_sign_out,
            log_level,
        })
    }
}

/// `<config dir>/skimmly/auth_token`, shared by every working directory.
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skimmly").join("auth_token"))
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
