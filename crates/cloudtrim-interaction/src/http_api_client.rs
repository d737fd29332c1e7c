//! HttpApiClient - REST implementation of the CloudTrim backend API.
//!
//! Every request reads the stored token and, when there is one, sends it as
//! `Authorization: Bearer <token>`. No retries and no backoff: the first
//! failure is returned to the caller.

use async_trait::async_trait;
use cloudtrim_core::api::{CloudTrimApi, HealthStatus, TokenStore};
use cloudtrim_core::auth::{Credentials, SessionPayload, SignupCredentials};
use cloudtrim_core::config::ClientConfig;
use cloudtrim_core::cost::CostSnapshot;
use cloudtrim_core::error::{ApiError, Result};
use cloudtrim_core::recommendation::{Recommendation, SavingsForecast};
use cloudtrim_core::resource::{ResourceRecord, ResourceUtilization, UnderutilizedResource};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Client for the CloudTrim REST backend.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl HttpApiClient {
    /// Creates a client with no request timeout.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base_url(base_url)?,
            tokens,
        })
    }

    /// Creates a client from the resolved configuration.
    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::network(format!("HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.api_base_url)?,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_input("API base URL cannot have a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, cancel: &CancellationToken, url: Url) -> Result<T> {
        let body = self.send(cancel, Method::GET, url, None).await?;
        decode(&body)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        url: Url,
        payload: Option<Value>,
    ) -> Result<T> {
        let body = self.send(cancel, Method::POST, url, payload).await?;
        decode(&body)
    }

    /// Sends one request, racing it against the cancellation token.
    ///
    /// Returns the raw body of a 2xx response.
    async fn send(
        &self,
        cancel: &CancellationToken,
        method: Method,
        url: Url,
        payload: Option<Value>,
    ) -> Result<String> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(token) = self.tokens.load()? {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(payload) = payload {
            request = request.json(&payload);
        }

        tracing::debug!("[HttpApiClient] {} {}", method, url.path());

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|err| ApiError::network(format!("{method} {url} failed: {err}")))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| ApiError::network(format!("Failed to read response body: {err}")))?;

            if !status.is_success() {
                return Err(map_http_error(status, &body));
            }
            Ok::<_, ApiError>(body)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("[HttpApiClient] {} {} cancelled", method, url.path());
                Err(ApiError::Cancelled)
            }
            result = exchange => {
                if let Err(err) = &result {
                    tracing::debug!("[HttpApiClient] {} {} failed: {}", method, url.path(), err);
                }
                result
            }
        }
    }

    /// Persists the session token unless the caller gave up on the request.
    fn remember_token(&self, cancel: &CancellationToken, payload: &SessionPayload) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        if let Some(token) = payload.token.as_deref().filter(|t| !t.is_empty()) {
            self.tokens.save(token)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CloudTrimApi for HttpApiClient {
    async fn login(
        &self,
        cancel: &CancellationToken,
        credentials: &Credentials,
    ) -> Result<SessionPayload> {
        let url = self.endpoint(&["auth", "login"])?;
        let payload: SessionPayload = self
            .post(cancel, url, Some(serde_json::to_value(credentials)?))
            .await?;
        self.remember_token(cancel, &payload)?;
        Ok(payload)
    }

    async fn signup(
        &self,
        cancel: &CancellationToken,
        credentials: &SignupCredentials,
    ) -> Result<SessionPayload> {
        let url = self.endpoint(&["auth", "signup"])?;
        let payload: SessionPayload = self
            .post(cancel, url, Some(serde_json::to_value(credentials)?))
            .await?;
        self.remember_token(cancel, &payload)?;
        Ok(payload)
    }

    async fn logout(&self, cancel: &CancellationToken) -> Result<()> {
        let url = self.endpoint(&["auth", "logout"])?;
        let outcome = self.send(cancel, Method::POST, url, None).await.map(|_| ());
        // The local credential goes away whatever the server said.
        self.tokens.clear()?;
        outcome
    }

    async fn get_current_costs(&self, cancel: &CancellationToken) -> Result<CostSnapshot> {
        let url = self.endpoint(&["costs", "current"])?;
        self.get(cancel, url).await
    }

    async fn get_historical_costs(
        &self,
        cancel: &CancellationToken,
        days: u32,
    ) -> Result<CostSnapshot> {
        if days == 0 {
            return Err(ApiError::invalid_input("days must be a positive integer"));
        }
        let mut url = self.endpoint(&["costs", "historical"])?;
        url.query_pairs_mut().append_pair("days", &days.to_string());
        self.get(cancel, url).await
    }

    async fn get_optimization_recommendations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recommendation>> {
        let url = self.endpoint(&["recommendations"])?;
        self.get(cancel, url).await
    }

    async fn get_resource_utilization(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ResourceUtilization> {
        let url = self.endpoint(&["resources", "utilization"])?;
        self.get(cancel, url).await
    }

    async fn get_resources(&self, cancel: &CancellationToken) -> Result<Vec<ResourceRecord>> {
        let url = self.endpoint(&["resources"])?;
        self.get(cancel, url).await
    }

    async fn apply_recommendation(
        &self,
        cancel: &CancellationToken,
        id: &str,
    ) -> Result<Recommendation> {
        if id.trim().is_empty() {
            return Err(ApiError::invalid_input("recommendation id must not be empty"));
        }
        let url = self.endpoint(&["optimization", "apply", id])?;
        self.post(cancel, url, None).await
    }

    async fn get_underutilized_resources(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<UnderutilizedResource>> {
        let url = self.endpoint(&["optimization", "underutilized"])?;
        self.get(cancel, url).await
    }

    async fn get_savings_forecast(&self, cancel: &CancellationToken) -> Result<SavingsForecast> {
        let url = self.endpoint(&["optimization", "forecast"])?;
        self.get(cancel, url).await
    }

    async fn health_check(&self, cancel: &CancellationToken) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        self.get(cancel, url).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|err| ApiError::invalid_input(format!("invalid API base URL '{base_url}': {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::invalid_input(format!(
            "invalid API base URL '{base_url}'"
        )));
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|err| ApiError::decode(format!("Failed to parse response: {err}")))
}

/// Error bodies seen from the CloudTrim backends: `{"error": ..}` from the Go
/// service, `{"detail": ..}` from FastAPI, `{"message": ..}` elsewhere.
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

fn map_http_error(status: StatusCode, body: &str) -> ApiError {
    let from_json = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.or(wrapper.detail).or(wrapper.message))
        .map(|value| match value {
            Value::String(text) => text,
            other => other.to_string(),
        });

    let message = from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    });

    ApiError::request(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudtrim_core::api::MemoryTokenStore;
    use cloudtrim_core::auth::User;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(base, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:8000/api/v1");
        assert_eq!(
            api.endpoint(&["costs", "current"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/costs/current"
        );

        let api = client("http://localhost:8000/api/v1/");
        assert_eq!(
            api.endpoint(&["optimization", "apply", "rec 1"]).unwrap().as_str(),
            "http://localhost:8000/api/v1/optimization/apply/rec%201"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpApiClient::new("not a url", Arc::new(MemoryTokenStore::new()));
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_map_http_error_variants() {
        let err = map_http_error(StatusCode::UNAUTHORIZED, r#"{"error": "Invalid credentials"}"#);
        assert_eq!(err, ApiError::request(401, "Invalid credentials"));

        let err = map_http_error(StatusCode::FORBIDDEN, r#"{"detail": "Not authenticated"}"#);
        assert_eq!(err.user_message(), "Not authenticated");

        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err, ApiError::request(500, "Internal Server Error"));

        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.user_message(), "upstream down");
    }

    #[tokio::test]
    async fn test_historical_costs_rejects_zero_days() {
        let api = client("http://127.0.0.1:9");
        let result = api
            .get_historical_costs(&CancellationToken::new(), 0)
            .await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_sends_nothing() {
        let api = client("http://127.0.0.1:9");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = api.get_current_costs(&cancel).await;
        assert_eq!(result, Err(ApiError::Cancelled));
    }

    #[test]
    fn test_token_not_saved_once_cancelled() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let api = HttpApiClient::new("http://127.0.0.1:9", tokens.clone()).unwrap();
        let payload = SessionPayload::new(Some("tok-123".to_string()), User::demo());

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(api.remember_token(&cancel, &payload), Err(ApiError::Cancelled));
        assert_eq!(tokens.load().unwrap(), None);

        api.remember_token(&CancellationToken::new(), &payload).unwrap();
        assert_eq!(tokens.load().unwrap().as_deref(), Some("tok-123"));
    }
}
