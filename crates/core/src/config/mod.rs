//! Configuration resolution for the address pipeline.
//!
//! Merges manifest entries over the documented defaults, validating keys and
//! coercing values, and produces an immutable [`ResolverConfig`] together with
//! the resolution [`Direction`]. Resolution is all-or-nothing: the first
//! invalid entry aborts without exposing a partial record.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::model::Direction;

/// A single manifest entry: a key with an optional value token.
///
/// Keys are matched case-insensitively. An absent value token is flag-style
/// shorthand for boolean `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
}

impl ConfigEntry {
    /// A key with a value token.
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// A bare key with no value token.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// Resolver settings for one pipeline invocation, read-only once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Provider identifier, e.g. `"nominatim"`.
    pub provider: String,
    /// User agent sent with provider requests.
    pub user_agent: String,
    /// Per-request provider timeout in seconds; must be positive.
    pub timeout: f64,
    /// Maximum number of provider attempts. Zero permits no attempt at all.
    pub retries: u32,
    /// Delay in seconds between failed attempts; must be non-negative.
    pub sleep: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider: "nominatim".to_string(),
            user_agent: "csv_user_ht".to_string(),
            timeout: 5.0,
            retries: 5,
            sleep: 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized configuration key '{key}'")]
    InvalidConfigKey { key: String },
    #[error("invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

/// Resolves manifest entries against the defaults.
///
/// Entries are applied in order, so a repeated key takes its last value.
pub fn resolve_config(
    entries: &[ConfigEntry],
) -> Result<(Direction, ResolverConfig), ConfigError> {
    let mut config = ResolverConfig::default();
    let mut reverse = false;

    for entry in entries {
        let key = entry.key.to_ascii_lowercase();
        let value = entry.value.as_deref();
        match key.as_str() {
            "provider" => config.provider = coerce_string(&key, value)?,
            "user_agent" => config.user_agent = coerce_string(&key, value)?,
            "timeout" => {
                let timeout = coerce_float(&key, value)?;
                // The engine turns this into a Duration, so NaN, infinities,
                // and values beyond the Duration range are invalid too.
                if timeout <= 0.0 || Duration::try_from_secs_f64(timeout).is_err() {
                    return Err(ConfigError::InvalidValue {
                        key: key.clone(),
                        expected: "a positive number of seconds",
                    });
                }
                config.timeout = timeout;
            }
            "retries" => config.retries = coerce_int(&key, value)?,
            "sleep" => {
                let sleep = coerce_float(&key, value)?;
                if sleep < 0.0 || Duration::try_from_secs_f64(sleep).is_err() {
                    return Err(ConfigError::InvalidValue {
                        key: key.clone(),
                        expected: "a non-negative number of seconds",
                    });
                }
                config.sleep = sleep;
            }
            "reverse" => reverse = coerce_bool(&key, value)?,
            _ => {
                return Err(ConfigError::InvalidConfigKey {
                    key: entry.key.clone(),
                })
            }
        }
    }

    debug!(?config, reverse, "resolved pipeline configuration");
    Ok((Direction::from_reverse_flag(reverse), config))
}

fn coerce_bool(key: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    // A bare key is flag-style shorthand for `true`.
    let Some(raw) = value else { return Ok(true) };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" => Ok(true),
        "0" | "no" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            expected: "a boolean (0/1/yes/no/true/false)",
        }),
    }
}

fn coerce_int(key: &str, value: Option<&str>) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        expected: "a non-negative integer",
    };
    let raw = value.ok_or_else(invalid)?;
    raw.trim().parse::<u32>().map_err(|_| invalid())
}

fn coerce_float(key: &str, value: Option<&str>) -> Result<f64, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        expected: "a number of seconds",
    };
    let raw = value.ok_or_else(invalid)?;
    raw.trim().parse::<f64>().map_err(|_| invalid())
}

fn coerce_string(key: &str, value: Option<&str>) -> Result<String, ConfigError> {
    let raw = value.ok_or(ConfigError::InvalidValue {
        key: key.to_string(),
        expected: "a string value",
    })?;
    Ok(raw.to_string())
}
