//! Start-up settings read from `RIDE_QUEUE_*` environment variables.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use ride_queue_core::Platform;
use thiserror::Error;
use tracing::info;

use crate::poller::DEFAULT_INTERVAL;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub platform: Platform,
    pub seed_demo: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `load` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let poll_secs: u64 = try_load(&lookup, "RIDE_QUEUE_POLL_SECS", &DEFAULT_INTERVAL.as_secs().to_string())?;
        if poll_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "RIDE_QUEUE_POLL_SECS",
                value: poll_secs.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let timeout_secs: Option<u64> = lookup("RIDE_QUEUE_TIMEOUT_SECS")
            .map(|raw| parse("RIDE_QUEUE_TIMEOUT_SECS", raw))
            .transpose()?;

        Ok(Self {
            api_base: try_load(&lookup, "RIDE_QUEUE_API", "http://127.0.0.1:3000/api")?,
            poll_interval: Duration::from_secs(poll_secs),
            request_timeout: timeout_secs.map(Duration::from_secs),
            platform: try_load(&lookup, "RIDE_QUEUE_PLATFORM", "desktop")?,
            seed_demo: try_load(&lookup, "RIDE_QUEUE_SEED_DEMO", "false")?,
        })
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse(key, raw)
}

fn parse<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: raw,
        }),
    }
}
