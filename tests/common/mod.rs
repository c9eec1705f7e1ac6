use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{Value, json};

pub const RATES_PATH: &str = "/v4/latest/USD";

/// Serves `rates` as an exchangerate-api style latest-rates body.
pub fn mock_rates<'a>(server: &'a MockServer, rates: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path(RATES_PATH);
        then.status(200).json_body(json!({
            "base": "USD",
            "date": "2026-10-16",
            "rates": rates,
        }));
    })
}

/// Value for `--rates-url` pointing at `server`.
pub fn rates_url(server: &MockServer) -> String {
    server.url("/v4/latest")
}
