//! Process configuration read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "SHELFWISE_BIND_ADDR";
pub const ANALYTICS_PLACEHOLDER_VAR: &str = "SHELFWISE_ANALYTICS_PLACEHOLDER";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Serve fixed placeholder figures from `/api/analytics` when aggregation
    /// fails, instead of an error response.
    pub analytics_placeholder: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            analytics_placeholder: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => raw.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    key: BIND_ADDR_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => {
                tracing::info!("{BIND_ADDR_VAR} not set; using {DEFAULT_BIND_ADDR}");
                defaults.bind_addr
            }
        };

        let analytics_placeholder = match lookup(ANALYTICS_PLACEHOLDER_VAR) {
            Some(raw) => parse_bool(ANALYTICS_PLACEHOLDER_VAR, &raw)?,
            None => defaults.analytics_placeholder,
        };
        if analytics_placeholder {
            tracing::warn!("analytics failures will be answered with placeholder figures");
        }

        Ok(Self {
            bind_addr,
            analytics_placeholder,
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (ANALYTICS_PLACEHOLDER_VAR, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.analytics_placeholder);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BIND_ADDR_VAR, .. }));

        let err =
            ApiConfig::from_lookup(lookup(&[(ANALYTICS_PLACEHOLDER_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains("expected true or false"));
    }
}
