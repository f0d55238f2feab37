//! Runtime configuration read from the environment.

use learn_core::DEFAULT_MASTERY_GOAL;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration.
///
/// Env vars (all optional):
/// - HOST: bind address, default `0.0.0.0`
/// - PORT: bind port, default `3000`
/// - RUST_LOG: tracing filter, default `info`
/// - DEFAULT_MASTERY_GOAL: goal used when a request omits one, default 2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub default_mastery_goal: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: "info".to_string(),
            default_mastery_goal: DEFAULT_MASTERY_GOAL,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => defaults.port,
        };

        let default_mastery_goal = match lookup("DEFAULT_MASTERY_GOAL") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|goal| *goal > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DEFAULT_MASTERY_GOAL",
                    value,
                })?,
            None => defaults.default_mastery_goal,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            default_mastery_goal,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("DEFAULT_MASTERY_GOAL", "3"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.default_mastery_goal, 3);
    }

    #[test]
    fn test_rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_zero_mastery_goal() {
        assert!(Config::from_lookup(lookup(&[("DEFAULT_MASTERY_GOAL", "0")])).is_err());
    }
}
