//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults target the public DummyJSON
//! instance and the conventional per-user state directory.
//!
//! - `STOREKEEP_API_URL` - Base URL of the upstream API (default: <https://dummyjson.com>)
//! - `STOREKEEP_STATE_DIR` - Directory for persisted snapshots
//!   (default: `$XDG_STATE_HOME/storekeep`, falling back to `~/.local/state/storekeep`)
//! - `STOREKEEP_PAGE_SIZE` - Products per catalog page, 1-100 (default: 12)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://dummyjson.com";
const DEFAULT_PAGE_SIZE: u32 = 12;
const MAX_PAGE_SIZE: u32 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream API, normalized to end with `/`.
    pub api_url: Url,
    /// Directory holding the session and cart snapshots.
    pub state_dir: PathBuf,
    /// Products requested per catalog page.
    pub page_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an unparseable value, or if
    /// no state directory can be derived from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("STOREKEEP_API_URL", DEFAULT_API_URL))?;
        let state_dir = resolve_state_dir(
            get_optional_env("STOREKEEP_STATE_DIR"),
            get_optional_env("XDG_STATE_HOME"),
            get_optional_env("HOME"),
        )?;
        let page_size = parse_page_size(&get_env_or_default(
            "STOREKEEP_PAGE_SIZE",
            &DEFAULT_PAGE_SIZE.to_string(),
        ))?;

        Ok(Self {
            api_url,
            state_dir,
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize the API base URL so that joining relative paths onto
/// it never clobbers a path segment.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("STOREKEEP_API_URL".to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Parse the page size, bounded to what the upstream listing accepts.
fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    let page_size = raw.parse::<u32>().map_err(|e| {
        ConfigError::InvalidEnvVar("STOREKEEP_PAGE_SIZE".to_string(), e.to_string())
    })?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar(
            "STOREKEEP_PAGE_SIZE".to_string(),
            format!("must be between 1 and {MAX_PAGE_SIZE} (got {page_size})"),
        ));
    }
    Ok(page_size)
}

/// Resolve the state directory: explicit override, then `$XDG_STATE_HOME`,
/// then `~/.local/state`.
fn resolve_state_dir(
    explicit: Option<String>,
    xdg_state_home: Option<String>,
    home: Option<String>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = xdg_state_home {
        return Ok(PathBuf::from(xdg).join("storekeep"));
    }
    if let Some(home) = home {
        return Ok(PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("storekeep"));
    }
    Err(ConfigError::MissingEnvVar("STOREKEEP_STATE_DIR".to_string()))
}
