use crate::model::{Chatbot, EvaluationRunRecord, KnowledgeBase};
use async_trait::async_trait;

/// Source of the chatbot listing.
#[async_trait]
pub trait ChatbotDirectory: Send + Sync {
    /// Full listing, in the order the source returns it.
    async fn list_chatbots(&self) -> anyhow::Result<Vec<Chatbot>>;

    /// First chatbot whose name equals `name` exactly.
    ///
    /// `None` input returns `None` without touching the source. A miss is
    /// `Ok(None)`, not an error.
    async fn resolve(&self, name: Option<&str>) -> anyhow::Result<Option<Chatbot>> {
        let Some(name) = name else {
            return Ok(None);
        };
        let chatbots = self.list_chatbots().await?;
        let found = chatbots
            .into_iter()
            .find(|c| c.name.as_deref() == Some(name));
        tracing::debug!(
            event = "directory.resolve",
            source = self.source_name(),
            name = %name,
            found = found.is_some()
        );
        Ok(found)
    }

    fn source_name(&self) -> &'static str;
}

/// Source of evaluation-run history.
#[async_trait]
pub trait RunHistory: Send + Sync {
    /// Every recorded run, unfiltered.
    async fn fetch_all(&self) -> anyhow::Result<Vec<EvaluationRunRecord>>;
}

/// Read access to knowledge-base file catalogs.
#[async_trait]
pub trait KnowledgeBaseSource: Send + Sync {
    async fn fetch_knowledge_base(&self, id: &str) -> anyhow::Result<Option<KnowledgeBase>>;
}

pub mod fake;
pub mod http;
