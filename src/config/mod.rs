//! Configuration loading with precedence handling.
//!
//! Resolution order: built-in defaults, then the TOML config file, then
//! `SWGAL_*` environment variables, then CLI flags. Later layers win.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default catalog search endpoint.
pub const DEFAULT_API_URL: &str = "https://swapi.py4e.com/api/people/";

/// Default quiet interval before a changed search text triggers a fetch.
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default per-request HTTP timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an explicitly requested config file.
    #[error("failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything unset falls back to the built-in
/// defaults. Lives at `~/.config/swgal/config.toml` unless overridden.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Catalog search endpoint.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Search debounce interval in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Per-request HTTP timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Path to the tracing log file.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying the full precedence chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalog search endpoint.
    pub api_url: String,
    /// Search debounce interval.
    pub debounce: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Path to the tracing log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file_path: default_log_path(),
        }
    }
}

/// Default log file location under the platform data directory.
fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("swgal")
        .join("swgal.log")
}

/// Default config file location under the platform config directory.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("swgal").join("config.toml"))
}

/// Load the config file, if any.
///
/// An explicitly requested path must exist and parse; the default path is
/// allowed to be absent.
pub fn load_config(explicit_path: Option<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, required) = match explicit_path {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(None),
        },
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) if !required => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    toml::from_str(&raw)
        .map(Some)
        .map_err(|err| ConfigError::ParseError {
            path,
            reason: err.to_string(),
        })
}

/// Merge a parsed config file over the built-in defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();
    let Some(file) = file else {
        return config;
    };
    if let Some(api_url) = file.api_url {
        config.api_url = api_url;
    }
    if let Some(ms) = file.debounce_ms {
        config.debounce = Duration::from_millis(ms);
    }
    if let Some(secs) = file.request_timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(path) = file.log_file_path {
        config.log_file_path = path;
    }
    config
}

/// Apply `SWGAL_*` environment variable overrides.
///
/// Unparseable numeric values are ignored rather than fatal; a broken
/// environment should not keep the gallery from starting.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(api_url) = std::env::var("SWGAL_API_URL") {
        config.api_url = api_url;
    }
    if let Some(ms) = env_u64("SWGAL_DEBOUNCE_MS") {
        config.debounce = Duration::from_millis(ms);
    }
    if let Some(secs) = env_u64("SWGAL_TIMEOUT_SECS") {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Ok(path) = std::env::var("SWGAL_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }
    config
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}

/// Apply CLI flag overrides; the final layer of the chain.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    api_url: Option<String>,
    debounce_ms: Option<u64>,
    timeout_secs: Option<u64>,
) -> ResolvedConfig {
    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }
    if let Some(ms) = debounce_ms {
        config.debounce = Duration::from_millis(ms);
    }
    if let Some(secs) = timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_point_at_the_public_endpoint() {
        let config = ResolvedConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn merge_config_without_a_file_yields_defaults() {
        assert_eq!(merge_config(None), ResolvedConfig::default());
    }

    #[test]
    fn merge_config_takes_file_values_over_defaults() {
        let file = ConfigFile {
            api_url: Some("https://example.test/people/".to_string()),
            debounce_ms: Some(150),
            ..ConfigFile::default()
        };

        let config = merge_config(Some(file));

        assert_eq!(config.api_url, "https://example.test/people/");
        assert_eq!(config.debounce, Duration::from_millis(150));
        // Untouched fields keep their defaults.
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        let result: Result<ConfigFile, _> = toml::from_str("page_size = 20");

        assert!(result.is_err());
    }

    #[test]
    fn config_file_parses_known_fields() {
        let file: ConfigFile = toml::from_str(
            r#"
            api_url = "https://example.test/people/"
            debounce_ms = 200
            request_timeout_secs = 5
            log_file_path = "/tmp/swgal.log"
            "#,
        )
        .expect("valid config");

        assert_eq!(file.debounce_ms, Some(200));
        assert_eq!(file.log_file_path, Some(PathBuf::from("/tmp/swgal.log")));
    }

    #[test]
    fn load_config_errors_on_missing_explicit_path() {
        let result = load_config(Some(PathBuf::from("/nonexistent/swgal.toml")));

        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn load_config_errors_on_invalid_toml() {
        let dir = std::env::temp_dir().join("swgal_test_config_invalid");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("config.toml");
        std::fs::write(&path, "api_url = [not toml").expect("write");

        let result = load_config(Some(path));

        let _ = std::fs::remove_dir_all(&dir);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    #[serial(swgal_env)]
    fn env_overrides_replace_file_values() {
        std::env::set_var("SWGAL_DEBOUNCE_MS", "50");
        std::env::set_var("SWGAL_API_URL", "https://env.test/people/");

        let config = apply_env_overrides(ResolvedConfig::default());

        std::env::remove_var("SWGAL_DEBOUNCE_MS");
        std::env::remove_var("SWGAL_API_URL");

        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.api_url, "https://env.test/people/");
    }

    #[test]
    #[serial(swgal_env)]
    fn unparseable_env_numbers_are_ignored() {
        std::env::set_var("SWGAL_DEBOUNCE_MS", "soon");

        let config = apply_env_overrides(ResolvedConfig::default());

        std::env::remove_var("SWGAL_DEBOUNCE_MS");

        assert_eq!(config.debounce, Duration::from_millis(300));
    }

    #[test]
    fn cli_overrides_win_over_everything() {
        let base = apply_cli_overrides(
            ResolvedConfig::default(),
            Some("https://cli.test/people/".to_string()),
            Some(25),
            Some(3),
        );

        assert_eq!(base.api_url, "https://cli.test/people/");
        assert_eq!(base.debounce, Duration::from_millis(25));
        assert_eq!(base.request_timeout, Duration::from_secs(3));
    }
}
