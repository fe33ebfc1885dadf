//! Value objects returned by the BCDice API.
//!
//! # Design
//! Each type has a `parse` constructor taking the raw response body. The
//! client never looks inside a body itself; it only forwards it here. The
//! system-info and diceroll endpoints wrap their payload in an envelope with
//! an `ok` flag, and an envelope carrying `"ok": false` is a parse failure
//! just like malformed JSON, so no half-populated value ever escapes.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Versions reported by `v1/version`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub api: String,
    pub bcdice: String,
}

impl VersionInfo {
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Rule systems known to the service, as reported by `v1/systems`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemList {
    pub systems: Vec<String>,
}

impl SystemList {
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn contains(&self, system: &str) -> bool {
        self.systems.iter().any(|s| s == system)
    }
}

/// Detail of a single rule system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInfo {
    pub name: String,
    #[serde(rename = "gameType")]
    pub game_type: String,
    /// Command prefixes (regular expressions) the system recognises.
    #[serde(rename = "prefixs", default)]
    pub prefixes: Vec<String>,
    /// Free-form help text.
    #[serde(default)]
    pub info: String,
}

#[derive(Deserialize)]
struct SystemInfoEnvelope {
    ok: bool,
    systeminfo: Option<SystemInfo>,
    reason: Option<String>,
}

impl SystemInfo {
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        let envelope: SystemInfoEnvelope = serde_json::from_str(body)?;
        match (envelope.ok, envelope.systeminfo) {
            (true, Some(info)) => Ok(info),
            (true, None) => Err(ParseError::Rejected {
                reason: "missing systeminfo".to_string(),
            }),
            (false, _) => Err(rejected(envelope.reason)),
        }
    }
}

/// A single rolled die.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Die {
    pub faces: u32,
    pub value: u32,
}

/// Outcome of `v1/diceroll`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DicerollResult {
    /// Result line as rendered by the service, e.g. `": (2D6) ＞ 7[3,4] ＞ 7"`.
    #[serde(rename = "result")]
    pub text: String,
    /// Secret rolls should only be shown to the player who made them.
    #[serde(default)]
    pub secret: bool,
    #[serde(rename = "dices", default)]
    pub dice: Vec<Die>,
}

#[derive(Deserialize)]
struct DicerollEnvelope {
    ok: bool,
    result: Option<String>,
    #[serde(default)]
    secret: bool,
    #[serde(default)]
    dices: Vec<Die>,
    reason: Option<String>,
}

impl DicerollResult {
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        let envelope: DicerollEnvelope = serde_json::from_str(body)?;
        if !envelope.ok {
            return Err(rejected(envelope.reason));
        }
        let text = envelope.result.ok_or_else(|| ParseError::Rejected {
            reason: "missing result".to_string(),
        })?;
        Ok(Self {
            text,
            secret: envelope.secret,
            dice: envelope.dices,
        })
    }

    /// Sum of all rolled dice values.
    pub fn total(&self) -> u32 {
        self.dice.iter().map(|d| d.value).sum()
    }
}

fn rejected(reason: Option<String>) -> ParseError {
    ParseError::Rejected {
        reason: reason.unwrap_or_else(|| "unknown reason".to_string()),
    }
}
