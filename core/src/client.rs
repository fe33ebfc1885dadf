//! Blocking client for the BCDice API v1 endpoints.
//!
//! # Design
//! `BcDiceClient` owns a normalized `base_url`, a long-lived `Transport`, and
//! the rule system used by plain `roll_dice` calls. Every operation goes
//! through `fetch_raw`, which resolves the URL, performs one GET, and turns
//! anything but a 200 into an `ApiError`. The operations themselves only pick
//! a path and hand the body to the matching `parse` constructor in `types`.
//!
//! The current system sits behind a `RwLock` so the client can be shared
//! across threads. A `roll_dice` racing a `set_system` sees whichever value
//! was written last; the lock only rules out torn reads.

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::{ClientConfig, DEFAULT_SYSTEM};
use crate::error::ApiError;
use crate::http::{HttpRequest, Transport, UreqTransport};
use crate::types::{DicerollResult, SystemInfo, SystemList, VersionInfo};

/// Relative paths of the v1 endpoints, query strings included.
pub mod paths {
    use url::form_urlencoded;

    pub const VERSION: &str = "v1/version";
    pub const SYSTEMS: &str = "v1/systems";

    pub fn system_info(system: &str) -> String {
        format!("v1/systeminfo?{}", query(&[("system", system)]))
    }

    pub fn diceroll(command: &str, system: &str) -> String {
        format!(
            "v1/diceroll?{}",
            query(&[("command", command), ("system", system)])
        )
    }

    /// UTF-8 form encoding: space becomes `+`, reserved bytes become `%XX`.
    fn query(pairs: &[(&str, &str)]) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish()
    }
}

/// Client for a single BCDice API server.
pub struct BcDiceClient<T = UreqTransport> {
    base_url: String,
    system: RwLock<String>,
    transport: T,
}

impl BcDiceClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(&config.base_url);
        client.set_system(config.system.as_str());
        client
    }
}

impl<T: Transport> BcDiceClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Self {
            base_url,
            system: RwLock::new(DEFAULT_SYSTEM.to_string()),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    pub fn build_request(&self, path: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}{path}", self.base_url),
        }
    }

    /// GET `path` and return the body of a 200 response.
    ///
    /// `path` is relative to the base URL and already carries its query
    /// string. No retry is attempted.
    pub fn fetch_raw(&self, path: &str) -> Result<String, ApiError> {
        let request = self.build_request(path);
        debug!(url = %request.url, "GET");

        let response = self.transport.get(&request).map_err(|source| {
            warn!(url = %request.url, error = %source, "request failed");
            ApiError::Transport {
                url: request.url.clone(),
                source,
            }
        })?;

        if response.status != 200 {
            warn!(url = %request.url, status = response.status, "unexpected status");
            return Err(ApiError::Status {
                status: response.status,
                url: request.url,
            });
        }
        Ok(response.body)
    }

    pub fn get_version(&self) -> Result<VersionInfo, ApiError> {
        let body = self.fetch_raw(paths::VERSION)?;
        Ok(VersionInfo::parse(&body)?)
    }

    pub fn get_systems(&self) -> Result<SystemList, ApiError> {
        let body = self.fetch_raw(paths::SYSTEMS)?;
        Ok(SystemList::parse(&body)?)
    }

    /// Fetch the detail of `game_type`.
    ///
    /// A 200 body that does not parse means the service does not know the
    /// system and is reported as `ApiError::SystemNotFound`. Transport and
    /// status failures are returned as they are.
    pub fn get_system_info(&self, game_type: &str) -> Result<SystemInfo, ApiError> {
        let body = self.fetch_raw(&paths::system_info(game_type))?;
        SystemInfo::parse(&body).map_err(|source| ApiError::SystemNotFound {
            system: game_type.to_string(),
            source,
        })
    }

    pub fn roll_dice_with_system(
        &self,
        command: &str,
        system: &str,
    ) -> Result<DicerollResult, ApiError> {
        let body = self.fetch_raw(&paths::diceroll(command, system))?;
        Ok(DicerollResult::parse(&body)?)
    }

    /// Roll `command` under the current system.
    pub fn roll_dice(&self, command: &str) -> Result<DicerollResult, ApiError> {
        let system = self.system();
        self.roll_dice_with_system(command, &system)
    }

    /// Replace the current system and return it. The name is not checked
    /// against the server.
    pub fn set_system(&self, new_system: impl Into<String>) -> String {
        let new_system = new_system.into();
        *self.system.write() = new_system.clone();
        new_system
    }

    pub fn system(&self) -> String {
        self.system.read().clone()
    }
}

impl<T> fmt::Display for BcDiceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[BcDiceClient] for {} : {}",
            self.base_url,
            self.system.read().as_str()
        )
    }
}

impl<T> fmt::Debug for BcDiceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BcDiceClient")
            .field("base_url", &self.base_url)
            .field("system", &*self.system.read())
            .finish_non_exhaustive()
    }
}
