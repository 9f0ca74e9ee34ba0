use crate::model::TimeSeries;
use crate::providers::{ChatbotDirectory, RunHistory};
use crate::registry::ScoreRegistry;
use crate::series;
use std::sync::Arc;

/// How the listing and history requests are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Resolve the chatbot first; fetch history only when it was found.
    #[default]
    Sequential,
    /// Issue both requests at once and filter afterwards. Results match
    /// `Sequential`, including for unknown chatbots.
    Concurrent,
}

/// Chatbot name in, chart-ready series out.
#[derive(Clone)]
pub struct MetricsPipeline {
    pub registry: Arc<ScoreRegistry>,
    pub directory: Arc<dyn ChatbotDirectory>,
    pub history: Arc<dyn RunHistory>,
    pub mode: FetchMode,
}

impl MetricsPipeline {
    pub fn new(
        registry: Arc<ScoreRegistry>,
        directory: Arc<dyn ChatbotDirectory>,
        history: Arc<dyn RunHistory>,
    ) -> Self {
        Self {
            registry,
            directory,
            history,
            mode: FetchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    pub async fn chatbot_metrics(&self, chatbot_name: Option<&str>) -> anyhow::Result<Vec<TimeSeries>> {
        let (chatbot, records) = match self.mode {
            FetchMode::Sequential => {
                let chatbot = self.directory.resolve(chatbot_name).await?;
                let records = match &chatbot {
                    Some(_) => self.history.fetch_all().await?,
                    None => Vec::new(),
                };
                (chatbot, records)
            }
            FetchMode::Concurrent => {
                if chatbot_name.is_none() {
                    (None, Vec::new())
                } else {
                    let (chatbot, records) =
                        tokio::join!(self.directory.resolve(chatbot_name), self.history.fetch_all());
                    match chatbot? {
                        Some(c) => (Some(c), records?),
                        // Sequential mode never asks for history here, so its
                        // outcome is dropped, failures included.
                        None => (None, Vec::new()),
                    }
                }
            }
        };

        let out = series::build(&self.registry, &records, chatbot.as_ref());

        tracing::info!(
            event = "pipeline.metrics",
            chatbot = chatbot_name.unwrap_or("<none>"),
            resolved = chatbot.is_some(),
            records = records.len(),
            points = out.first().map(|s| s.data.len()).unwrap_or(0),
            series = out.len()
        );

        Ok(out)
    }
}
