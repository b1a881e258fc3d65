use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::SessionSummary;

/// The backend collaborator that keeps session aggregates. One create call
/// per save; the engine never retries on its own.
#[async_trait]
pub trait SummarySink: Send + Sync {
    async fn save_summary(&self, summary: &SessionSummary) -> Result<()>;
}

/// Posts summaries to the platform's study-session endpoint.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/study-sessions/", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SummarySink for BackendClient {
    async fn save_summary(&self, summary: &SessionSummary) -> Result<()> {
        let mut request = self.http.post(self.endpoint()).json(summary);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("study-session save request failed")?;
        response
            .error_for_status()
            .context("backend rejected the study-session summary")?;

        Ok(())
    }
}

/// Sink for embedders that keep sessions local-only.
pub struct NullSink;

#[async_trait]
impl SummarySink for NullSink {
    async fn save_summary(&self, _summary: &SessionSummary) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slashes() {
        let client = BackendClient::new("http://localhost:8001/api/");
        assert_eq!(client.endpoint(), "http://localhost:8001/api/study-sessions/");

        let client = BackendClient::new("http://localhost:8001/api");
        assert_eq!(client.endpoint(), "http://localhost:8001/api/study-sessions/");
    }
}
