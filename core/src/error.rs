//! Error types for the BCDice API client.
//!
//! # Design
//! `ApiError` separates the ways a call can fail so callers can match on
//! the variant instead of reading messages: the service was unreachable
//! (`Transport`), it answered with something other than 200 (`Status`), it
//! answered 200 with a body that did not parse (`Parse`), or a system-info
//! lookup named a system the service does not know (`SystemNotFound`).
//! `SystemNotFound` keeps the underlying `ParseError` as its source.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Errors returned by `BcDiceClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS,
    /// protocol error, body read failure).
    #[error("{source} ({url})")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The server answered with a status other than 200.
    #[error("[{status}] {url}")]
    Status { status: u16, url: String },

    /// The body of a 200 response could not be turned into the expected type.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// `get_system_info` was asked about a system the service does not know.
    #[error("System '{system}' is not found")]
    SystemNotFound {
        system: String,
        #[source]
        source: ParseError,
    },
}

/// Failure to build a value object from a response body.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope was well formed but carried `"ok": false`.
    #[error("rejected by server: {reason}")]
    Rejected { reason: String },
}

/// An I/O-level failure reported by a `Transport`. Displays as its cause.
#[derive(Debug)]
pub struct TransportError(Box<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new(cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(cause.into())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}
