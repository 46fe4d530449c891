//! Global cache settings
//!
//! Settings come from a project file (`cacheEnabled = false`) and may be
//! overridden by `CUENV_CACHE_ENABLED`. They only select between the two
//! canonical states; per-task causes are decided elsewhere.

use crate::{CachingState, Error, Result};
use serde::{Deserialize, Serialize};
use std::env::VarError;

/// Environment variable that overrides [`CacheSettings::cache_enabled`].
pub const CACHE_ENABLED_ENV: &str = "CUENV_CACHE_ENABLED";

/// Build-wide cache settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CacheSettings {
    /// Whether task output caching is enabled for the build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_enabled: Option<bool>,
}

impl CacheSettings {
    /// Parse settings from TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::parse(e.to_string()))
    }

    /// Read settings from the environment.
    ///
    /// An unset or empty variable leaves `cache_enabled` unset. A value that
    /// is not valid UTF-8 is rejected.
    pub fn from_env() -> Result<Self> {
        let cache_enabled = match std::env::var(CACHE_ENABLED_ENV) {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(parse_flag(CACHE_ENABLED_ENV, &value)?),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(value)) => {
                return Err(Error::invalid_setting(
                    CACHE_ENABLED_ENV,
                    value.to_string_lossy(),
                ));
            }
        };
        Ok(Self { cache_enabled })
    }

    /// Apply environment overrides on top of these settings.
    pub fn with_env_override(self) -> Result<Self> {
        let env = Self::from_env()?;
        let merged = Self {
            cache_enabled: env.cache_enabled.or(self.cache_enabled),
        };
        tracing::debug!(
            file = ?self.cache_enabled,
            env = ?env.cache_enabled,
            enabled = merged.is_enabled(),
            "Resolved cache settings"
        );
        Ok(merged)
    }

    /// Whether caching is enabled. Defaults to `true` when unset.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.cache_enabled.unwrap_or(true)
    }

    /// The state every task starts from before per-task checks.
    #[must_use]
    pub fn initial_state(&self) -> CachingState {
        if self.is_enabled() {
            CachingState::ENABLED
        } else {
            CachingState::DISABLED
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_setting(key, value)),
    }
}
