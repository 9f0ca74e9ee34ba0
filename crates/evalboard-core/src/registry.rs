use crate::model::ScoreName;
use serde::Serialize;

/// Ordered set of score names the dashboard charts.
///
/// Built once at startup and shared read-only; order decides series order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreRegistry {
    scores: Vec<ScoreName>,
}

impl ScoreRegistry {
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ScoreName>,
    {
        Self {
            scores: scores.into_iter().map(Into::into).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scores.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
