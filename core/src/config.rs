//! Client configuration.
//!
//! `ClientConfig` holds the two things a caller decides before the first
//! request: where the service lives and which rule system plain
//! `roll_dice` calls use. Values can come from the environment so a
//! deployment can point at a different server without code changes.

use std::env;

/// Rule system used until `set_system` is called.
pub const DEFAULT_SYSTEM: &str = "DiceBot";

/// BCDice-API listens on 9292 unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9292/";

pub const BASE_URL_ENV: &str = "BCDICE_API_URL";
pub const SYSTEM_ENV: &str = "BCDICE_SYSTEM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub system: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            system: DEFAULT_SYSTEM.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Build a config from `BCDICE_API_URL` and `BCDICE_SYSTEM`, falling
    /// back to the defaults for unset or empty variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty(BASE_URL_ENV).unwrap_or(defaults.base_url),
            system: non_empty(SYSTEM_ENV).unwrap_or(defaults.system),
        }
    }
}
