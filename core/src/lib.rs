//! Synchronous client for the BCDice dice-rolling API.
//!
//! # Overview
//! `BcDiceClient` wraps the four v1 endpoints (`version`, `systems`,
//! `systeminfo`, `diceroll`). Each call resolves a URL against the base URL,
//! performs one blocking GET, checks for status 200, and parses the body into
//! a typed value.
//!
//! # Design
//! - Network I/O goes through the `Transport` trait. `UreqTransport` is the
//!   default; tests plug in fakes to script statuses and failures.
//! - Value objects are built by `parse` constructors in `types`, which fail
//!   atomically on malformed bodies or `"ok": false` envelopes.
//! - `ApiError` variants tell transport failures, bad statuses, unparseable
//!   bodies and unknown rule systems apart.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{paths, BcDiceClient};
pub use config::{ClientConfig, DEFAULT_SYSTEM};
pub use error::{ApiError, ParseError, TransportError};
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{DicerollResult, Die, SystemInfo, SystemList, VersionInfo};
