use super::{ChatbotDirectory, KnowledgeBaseSource, RunHistory};
use crate::errors::FetchError;
use crate::model::{Chatbot, EvaluationRunRecord, KnowledgeBase};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory chatbot listing that counts how often it was read.
#[derive(Default)]
pub struct FakeDirectory {
    pub chatbots: Vec<Chatbot>,
    pub fail_with: Option<String>,
    calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn new(chatbots: Vec<Chatbot>) -> Self {
        Self {
            chatbots,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatbotDirectory for FakeDirectory {
    async fn list_chatbots(&self) -> anyhow::Result<Vec<Chatbot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.fail_with {
            return Err(FetchError::new("fake://chatbots", msg.clone()).into());
        }
        Ok(self.chatbots.clone())
    }

    fn source_name(&self) -> &'static str {
        "fake"
    }
}

/// In-memory run history that counts how often it was read.
#[derive(Default)]
pub struct FakeHistory {
    pub records: Vec<EvaluationRunRecord>,
    pub fail_with: Option<String>,
    calls: AtomicUsize,
}

impl FakeHistory {
    pub fn new(records: Vec<EvaluationRunRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunHistory for FakeHistory {
    async fn fetch_all(&self) -> anyhow::Result<Vec<EvaluationRunRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.fail_with {
            return Err(FetchError::new("fake://history", msg.clone()).into());
        }
        Ok(self.records.clone())
    }
}

#[derive(Default)]
pub struct FakeKnowledgeBases {
    pub bases: Vec<(String, KnowledgeBase)>,
}

impl FakeKnowledgeBases {
    pub fn new(bases: Vec<(String, KnowledgeBase)>) -> Self {
        Self { bases }
    }
}

#[async_trait]
impl KnowledgeBaseSource for FakeKnowledgeBases {
    async fn fetch_knowledge_base(&self, id: &str) -> anyhow::Result<Option<KnowledgeBase>> {
        Ok(self
            .bases
            .iter()
            .find(|(kb_id, _)| kb_id == id)
            .map(|(_, kb)| kb.clone()))
    }
}
