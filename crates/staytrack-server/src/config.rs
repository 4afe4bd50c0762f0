//! Server configuration read from the environment (and `.env`).

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::{DisplayConfig, DisplayLocale, DEFAULT_UTC_OFFSET_MINUTES};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBind { var: &'static str, value: String },

    #[error("{var} is not a valid offset in minutes: {value}")]
    InvalidOffset { var: &'static str, value: String },

    #[error("{var}: {reason}")]
    InvalidLocale { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Base URL the landing view hands to the frontend.
    pub api_url: String,
    pub static_dir: PathBuf,
    pub display: DisplayConfig,
    /// Empty means permissive CORS.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("STAYTRACK_BIND").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let bind = bind_raw.parse().map_err(|_| ConfigError::InvalidBind {
            var: "STAYTRACK_BIND",
            value: bind_raw.clone(),
        })?;

        let locale = match lookup("STAYTRACK_LOCALE") {
            Some(raw) => raw
                .parse::<DisplayLocale>()
                .map_err(|reason| ConfigError::InvalidLocale {
                    var: "STAYTRACK_LOCALE",
                    reason,
                })?,
            None => DisplayLocale::default(),
        };

        let offset_minutes = match lookup("STAYTRACK_UTC_OFFSET_MINUTES") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| ConfigError::InvalidOffset {
                var: "STAYTRACK_UTC_OFFSET_MINUTES",
                value: raw.clone(),
            })?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let display =
            DisplayConfig::new(locale, offset_minutes).ok_or_else(|| ConfigError::InvalidOffset {
                var: "STAYTRACK_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind,
            api_url: lookup("STAYTRACK_API_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            static_dir: lookup("STAYTRACK_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            display,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.display, DisplayConfig::default());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STAYTRACK_BIND", "127.0.0.1:9000"),
            ("STAYTRACK_LOCALE", "en"),
            ("STAYTRACK_UTC_OFFSET_MINUTES", "-300"),
            ("CORS_ORIGINS", "http://a.local, ,http://b.local"),
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.display.locale, DisplayLocale::English);
        assert_eq!(config.display.utc_offset.local_minus_utc(), -300 * 60);
        assert_eq!(config.cors_origins, vec!["http://a.local", "http://b.local"]);
    }

    #[test]
    fn test_invalid_bind() {
        let err = config_from(&[("STAYTRACK_BIND", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind { .. }));
    }

    #[test]
    fn test_invalid_offset() {
        assert!(matches!(
            config_from(&[("STAYTRACK_UTC_OFFSET_MINUTES", "abc")]).unwrap_err(),
            ConfigError::InvalidOffset { .. }
        ));
        assert!(matches!(
            config_from(&[("STAYTRACK_UTC_OFFSET_MINUTES", "1440")]).unwrap_err(),
            ConfigError::InvalidOffset { .. }
        ));
    }

    #[test]
    fn test_invalid_locale() {
        let err = config_from(&[("STAYTRACK_LOCALE", "klingon")]).unwrap_err();
        assert!(err.to_string().starts_with("STAYTRACK_LOCALE:"));
    }
}
