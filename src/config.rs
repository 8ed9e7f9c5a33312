//! Runtime configuration from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `OCEAN_API_URL` | `http://localhost:3001` | base URL of the menu API |
//! | `OCEAN_POLL_INTERVAL_SECS` | `6` | delay between order-tracking polls |
//! | `OCEAN_HTTP_TIMEOUT_SECS` | unset | per-request timeout; unset keeps the transport default |
//!
//! `main` loads a `.env` file first and lets command-line flags override the
//! result through [`Config::with_overrides`], which validates them the same way.

use reqwest::Url;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const API_URL: &str = "OCEAN_API_URL";
pub const POLL_INTERVAL_SECS: &str = "OCEAN_POLL_INTERVAL_SECS";
pub const HTTP_TIMEOUT_SECS: &str = "OCEAN_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(6);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: Url,
    pub poll_interval: Duration,
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; missing keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match lookup(API_URL) {
            Some(raw) => parse_api_url(&raw)?,
            None => {
                info!("{API_URL} not set, using default: {DEFAULT_API_URL}");
                parse_api_url(DEFAULT_API_URL)?
            }
        };

        let poll_secs: u64 = match lookup(POLL_INTERVAL_SECS) {
            Some(raw) => parse(POLL_INTERVAL_SECS, &raw)?,
            None => {
                info!(
                    "{POLL_INTERVAL_SECS} not set, using default: {}",
                    DEFAULT_POLL_INTERVAL.as_secs()
                );
                DEFAULT_POLL_INTERVAL.as_secs()
            }
        };
        let poll_interval = positive_secs(POLL_INTERVAL_SECS, poll_secs)?;

        let http_timeout = lookup(HTTP_TIMEOUT_SECS)
            .map(|raw| {
                parse(HTTP_TIMEOUT_SECS, &raw).and_then(|s| positive_secs(HTTP_TIMEOUT_SECS, s))
            })
            .transpose()?;

        Ok(Self {
            api_url,
            poll_interval,
            http_timeout,
        })
    }
}

impl Config {
    /// Replaces the API URL and poll interval where a flag was given.
    pub fn with_overrides(
        mut self,
        api_url: Option<&str>,
        poll_interval_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = api_url {
            self.api_url = parse_api_url(raw)?;
        }
        if let Some(secs) = poll_interval_secs {
            self.poll_interval = positive_secs(POLL_INTERVAL_SECS, secs)?;
        }
        Ok(self)
    }
}

/// Parses a base URL that endpoint paths can be appended to.
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid(API_URL, raw, e))?;
    if url.cannot_be_a_base() {
        return Err(invalid(API_URL, raw, "not a base URL"));
    }
    Ok(url)
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        invalid(key, raw, e)
    })
}

fn positive_secs(key: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(invalid(key, &secs.to_string(), "must be at least 1"));
    }
    Ok(Duration::from_secs(secs))
}

fn invalid(key: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.poll_interval, Duration::from_secs(6));
        assert_eq!(config.http_timeout, None);
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup(&[
            (API_URL, "https://api.oceaneats.test/"),
            (POLL_INTERVAL_SECS, "10"),
            (HTTP_TIMEOUT_SECS, " 30 "),
        ]))
        .unwrap();
        assert_eq!(config.api_url.host_str(), Some("api.oceaneats.test"));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn overrides_replace_and_validate() {
        let base = Config::from_lookup(lookup(&[])).unwrap();

        let config = base
            .clone()
            .with_overrides(Some("https://eats.example.org/v2/"), Some(15))
            .unwrap();
        assert_eq!(config.api_url.as_str(), "https://eats.example.org/v2/");
        assert_eq!(config.poll_interval, Duration::from_secs(15));

        assert_eq!(base.clone().with_overrides(None, None).unwrap(), base);

        let err = base.clone().with_overrides(None, Some(0)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == POLL_INTERVAL_SECS));
        assert!(base.with_overrides(Some("nope"), None).is_err());
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = Config::from_lookup(lookup(&[(POLL_INTERVAL_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == POLL_INTERVAL_SECS));

        assert!(Config::from_lookup(lookup(&[(POLL_INTERVAL_SECS, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(API_URL, "not a url")])).is_err());
        assert!(Config::from_lookup(lookup(&[(API_URL, "mailto:eats@example.com")])).is_err());
    }
}
