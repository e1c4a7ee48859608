//! Shared HTTP plumbing for the exchange REST clients

mod types;

pub use types::ApiError;

use crate::proxy::ProxySettings;
use crate::telemetry;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Empty query string
pub const NO_QUERY: &[(&str, &str)] = &[];

const USER_AGENT: &str = concat!("coin-panel/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client used for all REST traffic
///
/// Routes through the proxy when the settings have it enabled.
pub fn build_client(timeout: Duration, proxy: &ProxySettings) -> anyhow::Result<Client> {
    let builder = Client::builder().timeout(timeout).user_agent(USER_AGENT);
    let builder = proxy.apply(builder)?;
    Ok(builder.build()?)
}

/// GET a JSON document and decode it
///
/// Non-2xx responses become [`ApiError::Status`] with the response body.
pub async fn get_json<T, Q>(
    client: &Client,
    base_url: &str,
    path: &str,
    query: &Q,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let url = format!("{}{}", base_url, path);
    let started = Instant::now();

    tracing::debug!(url = %url, "GET");
    let result = fetch(client, &url, query).await;
    telemetry::record_request(path, started.elapsed(), result.is_ok());

    if let Err(ref e) = result {
        tracing::warn!(url = %url, error = %e, "REST request failed");
    }
    result
}

async fn fetch<T, Q>(client: &Client, url: &str, query: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct ServerTime {
        #[serde(rename = "serverTime")]
        server_time: i64,
    }

    fn client() -> Client {
        build_client(DEFAULT_TIMEOUT, &ProxySettings::default()).unwrap()
    }

    #[test]
    fn test_build_client_with_proxy() {
        let proxy = ProxySettings::enabled("http://127.0.0.1:7890");
        assert!(build_client(DEFAULT_TIMEOUT, &proxy).is_ok());
    }

    #[tokio::test]
    async fn test_get_json_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/time"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"serverTime": 1704067200000_i64})),
            )
            .mount(&server)
            .await;

        let time: ServerTime = get_json(&client(), &server.uri(), "/api/v3/time", NO_QUERY)
            .await
            .unwrap();
        assert_eq!(time.server_time, 1704067200000);
    }

    #[tokio::test]
    async fn test_get_json_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/echo"))
            .and(query_param("symbol", "BTCUSDT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .mount(&server)
            .await;

        let values: Vec<u32> = get_json(&client(), &server.uri(), "/echo", &[("symbol", "BTCUSDT")])
            .await
            .unwrap();
        assert_eq!(values, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_get_json_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"code":-1121,"msg":"Invalid symbol."}"#),
            )
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> =
            get_json(&client(), &server.uri(), "/api/v3/ticker/price", NO_QUERY).await;

        match result {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid symbol"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_json_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result: Result<ServerTime, _> =
            get_json(&client(), &server.uri(), "/broken", NO_QUERY).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
