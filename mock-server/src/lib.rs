//! Deterministic stand-in for BCDice-API v1.
//!
//! Serves the four endpoints the client uses. Rolls are not random: die `i`
//! of an `NdM` command shows `(i mod M) + 1`, so tests can assert exact
//! results.

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const API_VERSION: &str = "0.6.0";
pub const BCDICE_VERSION: &str = "2.02.80";

/// Larger rolls are answered as unsupported commands.
pub const MAX_DICE: u32 = 1000;

pub const SYSTEMS: &[&str] = &["DiceBot", "Cthulhu", "SwordWorld2.0", "Shadowrun"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Version {
    pub api: String,
    pub bcdice: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Systems {
    pub systems: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemInfo {
    pub name: String,
    #[serde(rename = "gameType")]
    pub game_type: String,
    pub prefixs: Vec<String>,
    pub info: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Die {
    pub faces: u32,
    pub value: u32,
}

/// Body shared by `systeminfo` and `diceroll`; absent fields are omitted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systeminfo: Option<SystemInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dices: Option<Vec<Die>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Envelope {
    fn rejected(reason: &str) -> Self {
        Self {
            ok: false,
            reason: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
pub struct SystemInfoQuery {
    pub system: String,
}

#[derive(Deserialize)]
pub struct DicerollQuery {
    pub command: String,
    pub system: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/v1/version", get(version))
        .route("/v1/systems", get(systems))
        .route("/v1/systeminfo", get(system_info))
        .route("/v1/diceroll", get(diceroll))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn version() -> Json<Version> {
    Json(Version {
        api: API_VERSION.to_string(),
        bcdice: BCDICE_VERSION.to_string(),
    })
}

async fn systems() -> Json<Systems> {
    Json(Systems {
        systems: SYSTEMS.iter().map(|s| s.to_string()).collect(),
    })
}

/// Unknown systems still answer 200, with an `"ok": false` envelope.
async fn system_info(Query(query): Query<SystemInfoQuery>) -> Json<Envelope> {
    if !SYSTEMS.contains(&query.system.as_str()) {
        tracing::debug!(system = %query.system, "unknown system");
        return Json(Envelope::rejected("unsupported dicebot"));
    }
    Json(Envelope {
        ok: true,
        systeminfo: Some(SystemInfo {
            name: query.system.clone(),
            game_type: query.system,
            prefixs: Vec::new(),
            info: String::new(),
        }),
        ..Envelope::default()
    })
}

async fn diceroll(Query(query): Query<DicerollQuery>) -> (StatusCode, Json<Envelope>) {
    let Some(roll) = Roll::parse(&query.command) else {
        tracing::debug!(command = %query.command, "unsupported command");
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::rejected("unsupported command")),
        );
    };

    let dices: Vec<Die> = (0..roll.count)
        .map(|i| Die {
            faces: roll.faces,
            value: i % roll.faces + 1,
        })
        .collect();
    let total: u64 = dices.iter().map(|d| u64::from(d.value)).sum();
    let values: Vec<String> = dices.iter().map(|d| d.value.to_string()).collect();
    let result = format!(
        "{} : ({}) ＞ {total}[{}] ＞ {total}",
        query.system,
        query.command,
        values.join(",")
    );

    (
        StatusCode::OK,
        Json(Envelope {
            ok: true,
            result: Some(result),
            secret: Some(roll.secret),
            dices: Some(dices),
            ..Envelope::default()
        }),
    )
}

/// A command of the form `[S]NdM` followed by anything, with at most
/// `MAX_DICE` dice.
#[derive(Debug, PartialEq, Eq)]
struct Roll {
    count: u32,
    faces: u32,
    secret: bool,
}

impl Roll {
    fn parse(command: &str) -> Option<Self> {
        let (secret, rest) = match command.strip_prefix(['S', 's']) {
            Some(rest) => (true, rest),
            None => (false, command),
        };
        let (count, rest) = split_number(rest)?;
        let rest = rest.strip_prefix(['D', 'd'])?;
        let (faces, _) = split_number(rest)?;
        if count == 0 || count > MAX_DICE || faces == 0 {
            return None;
        }
        Some(Self {
            count,
            faces,
            secret,
        })
    }
}

fn split_number(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let n = s[..end].parse().ok()?;
    Some((n, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_parses_plain_command() {
        assert_eq!(
            Roll::parse("2D6"),
            Some(Roll {
                count: 2,
                faces: 6,
                secret: false
            })
        );
    }

    #[test]
    fn roll_parses_secret_and_trailing_text() {
        let roll = Roll::parse("s1d100<=50 skill").unwrap();
        assert!(roll.secret);
        assert_eq!(roll.count, 1);
        assert_eq!(roll.faces, 100);
    }

    #[test]
    fn roll_rejects_non_dice() {
        assert_eq!(Roll::parse("hello"), None);
        assert_eq!(Roll::parse("D6"), None);
        assert_eq!(Roll::parse("2D"), None);
        assert_eq!(Roll::parse("0D6"), None);
    }

    #[test]
    fn roll_rejects_too_many_dice() {
        assert!(Roll::parse("1000D200").is_some());
        assert_eq!(Roll::parse("1001D6"), None);
        assert_eq!(Roll::parse("50000000D200"), None);
        assert_eq!(Roll::parse("99999999999D6"), None);
    }

    #[tokio::test]
    async fn max_dice_with_huge_faces_does_not_overflow() {
        let query = DicerollQuery {
            command: "1000D4294967295".to_string(),
            system: "DiceBot".to_string(),
        };
        let (status, Json(envelope)) = diceroll(Query(query)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.dices.unwrap().len(), 1000);
        assert!(envelope.result.unwrap().ends_with("＞ 500500"));
    }

    #[test]
    fn rejected_envelope_omits_payload() {
        let json = serde_json::to_value(Envelope::rejected("unsupported dicebot")).unwrap();
        assert_eq!(json, serde_json::json!({"ok": false, "reason": "unsupported dicebot"}));
    }

    #[test]
    fn system_info_serializes_wire_names() {
        let info = SystemInfo {
            name: "Cthulhu".to_string(),
            game_type: "Cthulhu".to_string(),
            prefixs: vec!["CC".to_string()],
            info: String::new(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["gameType"], "Cthulhu");
        assert_eq!(json["prefixs"][0], "CC");
    }
}
