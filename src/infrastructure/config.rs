//! Runtime configuration read from `AUTOFLIP_*` environment variables.

use std::str::FromStr;
use std::time::Duration;

use crate::application::refresh::DEFAULT_REFRESH_INTERVAL;
use crate::application::session::SessionConfig;
use crate::domain::entities::wallet::DEFAULT_INITIAL_BALANCE;
use crate::domain::error::DomainError;
use crate::infrastructure::logging::LogFormat;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub refresh_interval: Duration,
    pub initial_balance: f64,
    /// Use the built-in simulated generator instead of the HTTP backend.
    pub offline: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            initial_balance: DEFAULT_INITIAL_BALANCE,
            offline: false,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(url) = lookup("AUTOFLIP_API_URL").filter(|v| !v.trim().is_empty()) {
            cfg.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("AUTOFLIP_REFRESH_SECS") {
            let secs: u64 = parse_var("AUTOFLIP_REFRESH_SECS", &raw)?;
            if secs == 0 {
                return Err(DomainError::Config(
                    "AUTOFLIP_REFRESH_SECS must be greater than zero".into(),
                ));
            }
            cfg.refresh_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("AUTOFLIP_INITIAL_BALANCE") {
            let balance: f64 = parse_var("AUTOFLIP_INITIAL_BALANCE", &raw)?;
            if !balance.is_finite() || balance < 0.0 {
                return Err(DomainError::Config(format!(
                    "AUTOFLIP_INITIAL_BALANCE must be a non-negative number, got {raw}"
                )));
            }
            cfg.initial_balance = balance;
        }

        if let Some(raw) = lookup("AUTOFLIP_OFFLINE") {
            cfg.offline = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        if let Some(raw) = lookup("AUTOFLIP_LOG_FORMAT") {
            cfg.log_format = raw.parse().map_err(DomainError::Config)?;
        }

        Ok(cfg)
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            initial_balance: self.initial_balance,
            refresh_interval: self.refresh_interval,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::Config(format!("{key} has an invalid value: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, DomainError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.initial_balance, 1000.0);
        assert!(!cfg.offline);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("AUTOFLIP_API_URL", "http://backend:8080"),
            ("AUTOFLIP_REFRESH_SECS", "5"),
            ("AUTOFLIP_INITIAL_BALANCE", "250.5"),
            ("AUTOFLIP_OFFLINE", "true"),
            ("AUTOFLIP_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(cfg.api_base_url, "http://backend:8080");
        assert_eq!(cfg.refresh_interval, Duration::from_secs(5));
        assert_eq!(cfg.initial_balance, 250.5);
        assert!(cfg.offline);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config(&[("AUTOFLIP_REFRESH_SECS", "0")]).is_err());
        assert!(config(&[("AUTOFLIP_REFRESH_SECS", "soon")]).is_err());
        assert!(config(&[("AUTOFLIP_INITIAL_BALANCE", "-1")]).is_err());
        assert!(config(&[("AUTOFLIP_LOG_FORMAT", "xml")]).is_err());
    }
}
