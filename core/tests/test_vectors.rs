//! Verify request URLs and response handling against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request path, a simulated
//! response, and either the expected parsed value or the expected error
//! variant. Responses are replayed through a fake transport, so no network
//! is involved.

use std::cell::RefCell;

use bcdice_core::{
    ApiError, BcDiceClient, DicerollResult, HttpRequest, HttpResponse, SystemInfo, SystemList,
    Transport, TransportError, VersionInfo,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:9292/";

/// Replays one simulated response and records the requested URL.
struct ReplayTransport {
    response: HttpResponse,
    requested: RefCell<Option<String>>,
}

impl ReplayTransport {
    fn from_case(case: &Value) -> Self {
        let sim = &case["simulated_response"];
        Self {
            response: HttpResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                body: sim["body"].as_str().unwrap().to_string(),
            },
            requested: RefCell::new(None),
        }
    }
}

impl Transport for ReplayTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.requested.borrow_mut() = Some(request.url.clone());
        Ok(self.response.clone())
    }
}

/// Name of the `ApiError` variant, as written in the vector files.
fn variant(err: &ApiError) -> &'static str {
    match err {
        ApiError::Transport { .. } => "Transport",
        ApiError::Status { .. } => "Status",
        ApiError::Parse(_) => "Parse",
        ApiError::SystemNotFound { .. } => "SystemNotFound",
    }
}

/// Run every case in `raw` through `call` and check URL and outcome.
fn check_vectors<T, F>(raw: &str, call: F)
where
    T: DeserializeOwned + PartialEq + std::fmt::Debug,
    F: Fn(&BcDiceClient<&ReplayTransport>, &Value) -> Result<T, ApiError>,
{
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = ReplayTransport::from_case(case);
        let client = BcDiceClient::with_transport(BASE_URL, &transport);

        let result = call(&client, &case["input"]);

        let expected_url = format!(
            "{BASE_URL}{}",
            case["expected_request"]["url"].as_str().unwrap()
        );
        assert_eq!(
            transport.requested.borrow().as_deref(),
            Some(expected_url.as_str()),
            "{name}: url"
        );

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(variant(&err), expected_error.as_str().unwrap(), "{name}: {err}");
        } else {
            let value = result.unwrap();
            let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(value, expected, "{name}: parsed result");
        }
    }
}

fn input<'a>(input: &'a Value, key: &str) -> &'a str {
    input[key].as_str().unwrap()
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

#[test]
fn version_test_vectors() {
    check_vectors::<VersionInfo, _>(include_str!("../../test-vectors/version.json"), |c, _| {
        c.get_version()
    });
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

#[test]
fn systems_test_vectors() {
    check_vectors::<SystemList, _>(include_str!("../../test-vectors/systems.json"), |c, _| {
        c.get_systems()
    });
}

// ---------------------------------------------------------------------------
// System info
// ---------------------------------------------------------------------------

#[test]
fn systeminfo_test_vectors() {
    check_vectors::<SystemInfo, _>(
        include_str!("../../test-vectors/systeminfo.json"),
        |c, i| c.get_system_info(input(i, "system")),
    );
}

// ---------------------------------------------------------------------------
// Diceroll
// ---------------------------------------------------------------------------

#[test]
fn diceroll_test_vectors() {
    check_vectors::<DicerollResult, _>(
        include_str!("../../test-vectors/diceroll.json"),
        |c, i| c.roll_dice_with_system(input(i, "command"), input(i, "system")),
    );
}
