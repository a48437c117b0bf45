//! Models API client for fetching the model list from a LiteLLM proxy
//!
//! LiteLLM speaks the OpenAI `/models` dialect but may report failures as an
//! `error` object inside a 200 response, so the body is checked even when the
//! status is fine.

use crate::error::{ConfigGenError, ConfigGenResult};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::debug;

/// Whole-request timeout applied to the models call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry from the upstream listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Model {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

impl Model {
    /// Create a model entry with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Error object LiteLLM embeds in the body
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    message: String,
}

/// Response from the `/models` endpoint
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<Model>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build the listing URL. The base URL is used verbatim.
fn models_url(base_url: &str) -> String {
    format!("{base_url}/models")
}

/// Models API client
pub struct ModelsApiClient {
    http_client: Client,
    timeout: Duration,
}

impl ModelsApiClient {
    /// Create a new Models API client
    pub fn new() -> ConfigGenResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| ConfigGenError::network(format!("failed to create client: {e}")))?;

        Ok(Self {
            http_client,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create with custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the model list from `{base_url}/models`
    pub async fn fetch_models(&self, base_url: &str, api_key: &str) -> ConfigGenResult<Vec<Model>> {
        let url = models_url(base_url);

        debug!("Fetching models from: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug!("Models API responded with status {}", status);
            return Err(ConfigGenError::upstream(format!(
                "API returned status {}",
                status.as_u16()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let api_response: ModelsResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ConfigGenError::decode(format!("failed to parse response: {e}")))?;

        if let Some(error) = api_response.error {
            return Err(ConfigGenError::upstream(format!(
                "API returned error: {}",
                error.message
            )));
        }

        let models = api_response.data;
        debug!("Fetched {} models", models.len());
        Ok(models)
    }

    fn transport_error(&self, error: reqwest::Error) -> ConfigGenError {
        if error.is_timeout() {
            ConfigGenError::network(format!(
                "failed to fetch models: request timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else {
            ConfigGenError::network(format!("failed to fetch models: {error}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_json(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json"),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_client_creation() {
        let client = ModelsApiClient::new().unwrap();
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_fetch_models_sends_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                serde_json::json!({"data": [{"id": "gpt-x"}, {"id": "claude-y"}]}).to_string(),
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let models = client.fetch_models(&base_url, "sk-test").await.unwrap();
        assert_eq!(models, vec![Model::new("gpt-x"), Model::new("claude-y")]);
    }

    #[test]
    fn test_models_url_appends_to_base_verbatim() {
        assert_eq!(models_url("https://x/v1"), "https://x/v1/models");
        assert_eq!(models_url("https://x/v1/"), "https://x/v1//models");
    }

    #[tokio::test]
    async fn test_null_fields_decode_as_empty() {
        let server = MockServer::start().await;
        mount_json(&server, 200, serde_json::json!({"data": [{"id": null}]})).await;
        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let models = client.fetch_models(&base_url, "k").await.unwrap();
        assert_eq!(models, vec![Model::new("")]);

        let server = MockServer::start().await;
        mount_json(
            &server,
            200,
            serde_json::json!({"data": null, "error": {"message": null}}),
        )
        .await;
        let base_url = format!("{}/v1", server.uri());
        let err = client.fetch_models(&base_url, "k").await.unwrap_err();
        assert_eq!(err, ConfigGenError::upstream("API returned error: "));
    }

    #[tokio::test]
    async fn test_empty_and_missing_data_are_not_errors() {
        let server = MockServer::start().await;
        mount_json(&server, 200, serde_json::json!({"data": []})).await;
        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        assert!(client.fetch_models(&base_url, "k").await.unwrap().is_empty());

        let server = MockServer::start().await;
        mount_json(&server, 200, serde_json::json!({"object": "list"})).await;
        let base_url = format!("{}/v1", server.uri());
        assert!(client.fetch_models(&base_url, "k").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_in_body_with_200_status() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            200,
            serde_json::json!({"data": [{"id": "m"}], "error": {"message": "boom"}}),
        )
        .await;

        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let err = client.fetch_models(&base_url, "k").await.unwrap_err();
        assert_eq!(err, ConfigGenError::upstream("API returned error: boom"));
    }

    #[tokio::test]
    async fn test_null_error_field_is_success() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            200,
            serde_json::json!({"data": [{"id": "m"}], "error": null}),
        )
        .await;

        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let models = client.fetch_models(&base_url, "k").await.unwrap();
        assert_eq!(models, vec![Model::new("m")]);
    }

    #[tokio::test]
    async fn test_non_200_status_is_fatal_regardless_of_body() {
        let server = MockServer::start().await;
        mount_json(&server, 401, serde_json::json!({"data": [{"id": "m"}]})).await;

        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let err = client.fetch_models(&base_url, "k").await.unwrap_err();
        assert_eq!(err, ConfigGenError::upstream("API returned status 401"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let err = client.fetch_models(&base_url, "k").await.unwrap_err();
        assert_eq!(err.error_code(), "decode_error");
        assert!(err.to_string().starts_with("failed to parse response:"));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let server = MockServer::start().await;
        mount_json(&server, 200, serde_json::json!({"data": "nope"})).await;

        let client = ModelsApiClient::new().unwrap();
        let base_url = format!("{}/v1", server.uri());
        let err = client.fetch_models(&base_url, "k").await.unwrap_err();
        assert_eq!(err.error_code(), "decode_error");
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"data": []}"#, "application/json")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = ModelsApiClient::new()
            .unwrap()
            .with_timeout(Duration::from_millis(100));
        let base_url = format!("{}/v1", server.uri());
        let err = client.fetch_models(&base_url, "k").await.unwrap_err();
        assert_eq!(err.error_code(), "network_error");
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ModelsApiClient::new().unwrap();
        let err = client
            .fetch_models(&format!("http://{addr}/v1"), "k")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "network_error");
        assert!(err.to_string().starts_with("failed to fetch models:"));
    }
}
