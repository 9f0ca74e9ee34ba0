use super::{ChatbotDirectory, KnowledgeBaseSource, RunHistory};
use crate::config::ClientConfig;
use crate::errors::FetchError;
use crate::model::{Chatbot, EvaluationRunRecord, KnowledgeBase};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const CHATBOTS_PATH: &str = "api/chatbots";
pub const HISTORY_PATH: &str = "api/history";
pub const KNOWLEDGE_BASES_PATH: &str = "api/knowledge-bases";

/// Client for the dashboard backend. One GET per call, no caching, no retry.
#[derive(Clone)]
pub struct HttpDashboardClient {
    pub config: ClientConfig,
    pub client: reqwest::Client,
}

impl HttpDashboardClient {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(event = "http.get", url = %url);

        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::new(url, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::new(url, format!("HTTP {}: {}", status, body)));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::new(url, format!("invalid JSON body: {}", e)))
    }

    fn knowledge_base_url(&self, id: &str) -> anyhow::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.config.endpoint(KNOWLEDGE_BASES_PATH))
            .with_context(|| format!("invalid base url '{}'", self.config.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("base url '{}' cannot carry a path", self.config.base_url))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl ChatbotDirectory for HttpDashboardClient {
    async fn list_chatbots(&self) -> anyhow::Result<Vec<Chatbot>> {
        let url = self.config.endpoint(CHATBOTS_PATH);
        let body = self.get_json(&url).await?;
        let chatbots = decode_chatbot_listing(body).map_err(|e| FetchError::new(&url, e))?;
        Ok(chatbots)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[async_trait]
impl RunHistory for HttpDashboardClient {
    async fn fetch_all(&self) -> anyhow::Result<Vec<EvaluationRunRecord>> {
        let url = self.config.endpoint(HISTORY_PATH);
        let body = self.get_json(&url).await?;
        let records = decode_history(body).map_err(|e| FetchError::new(&url, e))?;
        tracing::debug!(event = "history.fetched", records = records.len());
        Ok(records)
    }
}

#[async_trait]
impl KnowledgeBaseSource for HttpDashboardClient {
    async fn fetch_knowledge_base(&self, id: &str) -> anyhow::Result<Option<KnowledgeBase>> {
        let url = self.knowledge_base_url(id)?;
        let body = self.get_json(url.as_str()).await?;
        let kb = decode_knowledge_base(body).map_err(|e| FetchError::new(url.as_str(), e))?;
        Ok(kb)
    }
}

/// Decodes the chatbot listing.
///
/// The backend serializes the listing to a JSON string and then returns that
/// string as the body, so both `[...]` and `"[...]"` are accepted.
pub fn decode_chatbot_listing(body: Value) -> Result<Vec<Chatbot>, String> {
    let body = match body {
        Value::String(s) => serde_json::from_str::<Value>(&s)
            .map_err(|e| format!("chatbot listing string is not JSON: {}", e))?,
        other => other,
    };
    serde_json::from_value(body).map_err(|e| format!("unexpected chatbot listing shape: {}", e))
}

pub fn decode_history(body: Value) -> Result<Vec<EvaluationRunRecord>, String> {
    match body {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other)
            .map_err(|e| format!("unexpected history shape: {}", e)),
    }
}

/// Decodes a knowledge base. The backend answers unknown ids with
/// `{"message": "... does not exist"}` and a 200, which maps to `None`.
pub fn decode_knowledge_base(body: Value) -> Result<Option<KnowledgeBase>, String> {
    if body.get("kb_name").is_none() && body.get("message").is_some() {
        return Ok(None);
    }
    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| format!("unexpected knowledge base shape: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kb_url_escapes_id() {
        let client = HttpDashboardClient::new(ClientConfig {
            base_url: "http://localhost:8000/".into(),
            ..ClientConfig::default()
        })
        .unwrap();
        let url = client.knowledge_base_url("my kb/1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/knowledge-bases/my%20kb%2F1");
    }
}
