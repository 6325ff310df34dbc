//! HTTP+JSON client for the assistant backend.

use crate::config::BackendConfig;
use async_trait::async_trait;
use foreman_core::backend::WorkflowBackend;
use foreman_core::error::{ForemanError, Result};
use foreman_core::protocol::{ChatPayload, ChatRequest, StartPayload, StartRequest, StatusPayload};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `reqwest`-based implementation of [`WorkflowBackend`].
///
/// Talks to the backend's four endpoints under `/api/foreman/`. Every
/// request carries the configured timeout and, when present, a bearer
/// token.
#[derive(Clone)]
pub struct HttpWorkflowBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpWorkflowBackend {
    /// Creates a client from a loaded configuration.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.timeout(self.timeout);
        if let Some(api_key) = &self.api_key {
            request.header("Authorization", format!("Bearer {}", api_key))
        } else {
            request
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(target: "foreman::backend", "Calling {} endpoint", endpoint);
        let response = self.prepare(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ForemanError::api(status.as_u16(), error_text));
        }

        response.json::<T>().await.map_err(|e| {
            ForemanError::Serialization {
                format: "JSON".to_string(),
                message: e.to_string(),
            }
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/foreman/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl WorkflowBackend for HttpWorkflowBackend {
    async fn status(&self) -> Result<StatusPayload> {
        self.execute("status", self.client.get(self.url("status")))
            .await
    }

    async fn start(&self, request: &StartRequest) -> Result<StartPayload> {
        self.execute("start", self.client.post(self.url("start")).json(request))
            .await
    }

    async fn chat(&self, message: &str) -> Result<ChatPayload> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        self.execute("chat", self.client.post(self.url("chat")).json(&body))
            .await
    }

    async fn reset(&self) -> Result<()> {
        // The reset response body is ignored; only reachability matters.
        let response = self
            .prepare(self.client.post(self.url("reset")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ForemanError::api(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = BackendConfig {
            base_url: "http://localhost:8787/".to_string(),
            api_key: None,
            timeout_secs: 5,
        };
        let backend = HttpWorkflowBackend::new(&config);
        assert_eq!(backend.url("status"), "http://localhost:8787/api/foreman/status");
    }
}
