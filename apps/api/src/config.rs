use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::session::SessionSettings;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// `None` (empty `APF_DATA_DIR`) keeps snapshots in memory only.
    pub data_dir: Option<PathBuf>,
    pub persist_debounce_ms: u64,
    pub live_mode: bool,
    pub live_debounce_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: match std::env::var("APF_DATA_DIR") {
                Ok(dir) if dir.trim().is_empty() => None,
                Ok(dir) => Some(PathBuf::from(dir)),
                Err(_) => Some(PathBuf::from("./data")),
            },
            persist_debounce_ms: parse_env("APF_PERSIST_DEBOUNCE_MS", 250)?,
            live_mode: parse_bool_env("APF_LIVE_MODE", false)?,
            live_debounce_ms: parse_env("APF_LIVE_DEBOUNCE_MS", 400)?,
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            persist_debounce: Duration::from_millis(self.persist_debounce_ms),
            live_mode: self.live_mode,
            live_debounce: Duration::from_millis(self.live_debounce_ms),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).with_context(|| format!("{key} must be true or false, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("sometimes"), None);
    }

    #[test]
    fn test_session_settings_from_config() {
        let config = Config {
            port: 8080,
            rust_log: "info".to_string(),
            data_dir: None,
            persist_debounce_ms: 100,
            live_mode: true,
            live_debounce_ms: 900,
        };
        let settings = config.session_settings();
        assert_eq!(settings.persist_debounce, Duration::from_millis(100));
        assert!(settings.live_mode);
        assert_eq!(settings.live_debounce, Duration::from_millis(900));
    }
}
