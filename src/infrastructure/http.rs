use crate::domain::currency::BASE_CURRENCY;
use crate::domain::ports::RateSource;
use crate::domain::rates::ExchangeRateTable;
use crate::error::{ConverterError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Public endpoint serving the latest rates; the base currency is appended.
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest";

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: ExchangeRateTable,
}

/// Fetches rates from an exchangerate-api compatible HTTP endpoint.
///
/// Every call issues exactly one `GET {base_url}/USD` request. There is no
/// retry and no timeout beyond the transport defaults; network errors,
/// non-2xx statuses and malformed bodies all surface as
/// [`ConverterError::RateFetch`].
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
    client: Client,
    base_url: String,
}

impl ExchangeRateApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Full URL of the latest-rates resource.
    pub fn latest_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), BASE_CURRENCY)
    }
}

impl Default for ExchangeRateApi {
    fn default() -> Self {
        Self::new(DEFAULT_RATES_URL)
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    async fn latest_rates(&self) -> Result<ExchangeRateTable> {
        let url = self.latest_url();
        tracing::debug!(%url, "requesting exchange rates");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConverterError::RateFetch(format!("HTTP {status}")));
        }

        let body: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| ConverterError::RateFetch(format!("invalid response body: {e}")))?;

        tracing::debug!(count = body.rates.len(), "exchange rates received");
        Ok(body.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_latest_url_appends_base_currency() {
        let api = ExchangeRateApi::new("http://localhost:9000/v4/latest/");
        assert_eq!(api.latest_url(), "http://localhost:9000/v4/latest/USD");
        assert_eq!(
            ExchangeRateApi::default().latest_url(),
            "https://api.exchangerate-api.com/v4/latest/USD"
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200).json_body(json!({
                    "base": "USD",
                    "rates": { "USD": 1, "EUR": 0.9, "AED": 3.6725 }
                }));
            })
            .await;

        let api = ExchangeRateApi::new(server.url("/v4/latest"));
        let rates = api.latest_rates().await.unwrap();

        mock.assert_async().await;
        assert_eq!(rates.rate("EUR"), Some(dec!(0.9)));
        assert_eq!(rates.rate("AED"), Some(dec!(3.6725)));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(503);
            })
            .await;

        let api = ExchangeRateApi::new(server.url("/v4/latest"));
        let err = api.latest_rates().await.unwrap_err();

        assert!(matches!(err, ConverterError::RateFetch(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let api = ExchangeRateApi::new(server.url("/v4/latest"));
        let err = api.latest_rates().await.unwrap_err();

        assert!(matches!(err, ConverterError::RateFetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_missing_rates_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200).json_body(json!({ "result": "error" }));
            })
            .await;

        let api = ExchangeRateApi::new(server.url("/v4/latest"));
        assert!(matches!(
            api.latest_rates().await,
            Err(ConverterError::RateFetch(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_network_failure() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let api = ExchangeRateApi::new("http://127.0.0.1:9/v4/latest");
        assert!(matches!(
            api.latest_rates().await,
            Err(ConverterError::RateFetch(_))
        ));
    }
}
