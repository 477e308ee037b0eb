//! Process configuration, read from `LEDGER_*` environment variables.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

pub const LISTEN_ADDR_VAR: &str = "LEDGER_LISTEN_ADDR";
pub const REQUEST_TIMEOUT_VAR: &str = "LEDGER_REQUEST_TIMEOUT_SECS";
pub const SHUTDOWN_TIMEOUT_VAR: &str = "LEDGER_SHUTDOWN_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "LEDGER_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`, expected `text` or `json`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Upper bound for handling a single request.
    pub request_timeout: Duration,
    /// How long in-flight requests may take to drain once shutdown starts.
    pub shutdown_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(30),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Unset variables keep their default value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(LISTEN_ADDR_VAR) {
            config.listen_addr = parse_var(LISTEN_ADDR_VAR, value)?;
        }
        if let Some(value) = lookup(REQUEST_TIMEOUT_VAR) {
            config.request_timeout = Duration::from_secs(parse_var(REQUEST_TIMEOUT_VAR, value)?);
        }
        if let Some(value) = lookup(SHUTDOWN_TIMEOUT_VAR) {
            config.shutdown_timeout = Duration::from_secs(parse_var(SHUTDOWN_TIMEOUT_VAR, value)?);
        }
        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.log_format = parse_var(LOG_FORMAT_VAR, value)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|err| ConfigError::InvalidValue {
        var,
        reason: err.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
    }

    #[test]
    fn override_from_vars() {
        let config = load(&[
            (LISTEN_ADDR_VAR, "127.0.0.1:9000"),
            (REQUEST_TIMEOUT_VAR, "3"),
            (SHUTDOWN_TIMEOUT_VAR, " 5 "),
            (LOG_FORMAT_VAR, "JSON"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reject_invalid_values() {
        let err = load(&[(LISTEN_ADDR_VAR, "localhost")]).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidValue { var: LISTEN_ADDR_VAR, value, .. } if value == "localhost"
        ));

        let err = load(&[(SHUTDOWN_TIMEOUT_VAR, "-1")]).unwrap_err();
        assert!(err.to_string().starts_with(
            "invalid value `-1` for LEDGER_SHUTDOWN_TIMEOUT_SECS"
        ));

        let err = load(&[(LOG_FORMAT_VAR, "xml")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value `xml` for LEDGER_LOG_FORMAT: unknown log format `xml`, expected `text` or `json`"
        );
    }
}
