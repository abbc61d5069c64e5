use crate::domain::model::{Credentials, SearchQuery, SearchResponse};
use crate::domain::ports::{ConfigProvider, DomainSearch};
use crate::utils::error::{ActorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.tomba.io";
const DOMAIN_SEARCH_PATH: &str = "/v1/domain-search";

/// HTTP client for the Tomba domain search endpoint.
pub struct TombaClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl TombaClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tomba-etl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C, credentials: Credentials) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            credentials,
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, DOMAIN_SEARCH_PATH)
    }
}

#[async_trait]
impl DomainSearch for TombaClient {
    async fn domain_search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.endpoint();
        tracing::debug!("Making API request to: {} (domain={})", url, query.domain);

        let response = self
            .client
            .get(&url)
            .header("X-Tomba-Key", &self.credentials.key)
            .header("X-Tomba-Secret", &self.credentials.secret)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ActorError::ApiStatusError {
                status: status.as_u16(),
                message: api_error_message(&body, status.canonical_reason()),
            });
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}

// Tomba 的錯誤格式: {"errors": {"code": 401, "message": "..."}}
fn api_error_message(body: &str, reason: Option<&str>) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/errors/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| reason.unwrap_or("Unknown error").to_string())
}
