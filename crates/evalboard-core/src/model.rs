use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of one evaluation metric, e.g. `"accuracy"`.
pub type ScoreName = String;

/// Timestamp of an evaluation run as it arrived on the wire.
///
/// History rows are written by several producers, so the field is kept raw and
/// only interpreted by [`crate::time::parse_time_to_millis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunTime {
    Epoch(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Default for RunTime {
    fn default() -> Self {
        RunTime::Other(serde_json::Value::Null)
    }
}

impl From<&str> for RunTime {
    fn from(s: &str) -> Self {
        RunTime::Text(s.to_string())
    }
}

/// Chatbot identifier as the backend stored it.
///
/// Strings and numbers are distinct: `7` and `"7"` name different chatbots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Text(String),
    Number(serde_json::Number),
}

impl OpaqueId {
    fn from_json(v: serde_json::Value) -> Option<Self> {
        match v {
            serde_json::Value::String(s) => Some(OpaqueId::Text(s)),
            serde_json::Value::Number(n) => Some(OpaqueId::Number(n)),
            _ => None,
        }
    }
}

impl From<&str> for OpaqueId {
    fn from(s: &str) -> Self {
        OpaqueId::Text(s.to_string())
    }
}

impl fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpaqueId::Text(s) => f.write_str(s),
            OpaqueId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One historical evaluation event as served by `/api/history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRunRecord {
    #[serde(default, deserialize_with = "opaque_id_opt")]
    pub chatbot_id: Option<OpaqueId>,
    #[serde(default)]
    pub time: RunTime,
    /// Every other key of the row. Score values live here under their
    /// [`ScoreName`].
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl EvaluationRunRecord {
    pub fn new(chatbot_id: &str, time: impl Into<RunTime>) -> Self {
        Self {
            chatbot_id: Some(chatbot_id.into()),
            time: time.into(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn with_score(mut self, name: &str, value: f64) -> Self {
        self.fields.insert(name.to_string(), serde_json::json!(value));
        self
    }

    /// Numeric value recorded for `name`; `None` when the run did not compute
    /// it or stored something that is not a number.
    pub fn score(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(|v| v.as_f64())
    }

    pub fn belongs_to(&self, chatbot: &Chatbot) -> bool {
        self.chatbot_id.as_ref() == Some(&chatbot.id)
    }
}

/// Entry of the chatbot listing. Only `id` and `name` are read; the rest of the
/// pipeline configuration stored alongside is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chatbot {
    #[serde(deserialize_with = "opaque_id")]
    pub id: OpaqueId,
    /// Entries with a missing or non-string name never match a lookup.
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: Option<String>,
}

impl Chatbot {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: Some(name.to_string()),
        }
    }
}

/// One chart point: `[timestamp_millis, value]`.
///
/// Either side may be absent. An unparseable run time or a score the run did
/// not record still produces a point; both serialize as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint(pub Option<i64>, pub Option<f64>);

impl SeriesPoint {
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.0
    }

    pub fn value(&self) -> Option<f64> {
        self.1
    }
}

impl Serialize for SeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;

        let mut t = serializer.serialize_tuple(2)?;
        t.serialize_element(&self.0)?;
        t.serialize_element(&self.1.map(json_number))?;
        t.end()
    }
}

// Integral scores (latency in ms, token counts) render as integers, matching
// what the chart consumer receives from a JSON producer.
fn json_number(v: f64) -> serde_json::Value {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
        serde_json::Value::from(v as i64)
    } else {
        serde_json::Value::from(v)
    }
}

/// All points of one score for one chatbot, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub name: ScoreName,
    pub data: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: Vec::new(),
        }
    }
}

/// Knowledge base as returned by `/api/knowledge-bases/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub kb_name: String,
    #[serde(default)]
    pub files: Vec<KnowledgeBaseFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseFile {
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub date_uploaded: String,
    #[serde(default)]
    pub time_uploaded: String,
}

// Producers have written both strings and integers; other types match nothing.
fn opaque_id<'de, D: Deserializer<'de>>(d: D) -> Result<OpaqueId, D::Error> {
    opaque_id_opt(d)?.ok_or_else(|| serde::de::Error::custom("id must be a string or number"))
}

fn opaque_id_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<OpaqueId>, D::Error> {
    Ok(Option::<serde_json::Value>::deserialize(d)?.and_then(OpaqueId::from_json))
}

fn lenient_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(d)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_scores_in_fields() {
        let rec: EvaluationRunRecord = serde_json::from_value(json!({
            "chatbot_id": "A",
            "time": "2024-01-01T00:00:00Z",
            "accuracy": 0.9,
            "note": "manual"
        }))
        .unwrap();

        assert_eq!(rec.chatbot_id, Some(OpaqueId::from("A")));
        assert_eq!(rec.time, RunTime::Text("2024-01-01T00:00:00Z".into()));
        assert_eq!(rec.score("accuracy"), Some(0.9));
        assert_eq!(rec.score("note"), None);
        assert_eq!(rec.score("latency"), None);
    }

    #[test]
    fn numeric_ids_match_only_numeric_ids() {
        let rec: EvaluationRunRecord =
            serde_json::from_value(json!({"chatbot_id": 7, "time": 1704067200000i64})).unwrap();
        assert_eq!(rec.chatbot_id, Some(OpaqueId::Number(7.into())));
        assert!(matches!(rec.time, RunTime::Epoch(_)));

        let numeric: Chatbot = serde_json::from_value(json!({"id": 7, "name": "seven"})).unwrap();
        assert!(rec.belongs_to(&numeric));

        let text: Chatbot = serde_json::from_value(json!({"id": "7", "name": "seven"})).unwrap();
        assert!(!rec.belongs_to(&text));
    }

    #[test]
    fn non_string_chatbot_name_is_absent() {
        let bot: Chatbot = serde_json::from_value(json!({"id": "a", "name": 5})).unwrap();
        assert_eq!(bot.name, None);
        assert_eq!(bot.id.to_string(), "a");
    }

    #[test]
    fn record_without_chatbot_id_belongs_to_nobody() {
        let rec: EvaluationRunRecord = serde_json::from_value(json!({"time": "x"})).unwrap();
        assert!(!rec.belongs_to(&Chatbot::new("A", "bot1")));
    }

    #[test]
    fn series_point_serializes_as_pair() {
        let p = SeriesPoint(Some(1704067200000), Some(120.0));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1704067200000,120]");

        let p = SeriesPoint(Some(1), Some(0.9));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1,0.9]");

        let p = SeriesPoint(None, None);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[null,null]");
    }

    #[test]
    fn knowledge_base_tolerates_missing_file_fields() {
        let kb: KnowledgeBase = serde_json::from_value(json!({
            "kb_name": "giraffes",
            "id": "giraffes",
            "files": [{"file_name": "a.pdf"}]
        }))
        .unwrap();
        assert_eq!(kb.files.len(), 1);
        assert_eq!(kb.files[0].content_type, "");
    }
}
