use crate::errors::ConfigError;
use crate::registry::ScoreRegistry;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SCORES_PATH: &str = "evals/eval_config.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Shape of the evaluation config file. Only `scores` matters here; the file is
/// shared with the evaluation runner, which owns the other keys.
#[derive(Debug, Deserialize)]
struct ScoreConfigFile {
    scores: Option<Vec<String>>,
}

// Keys the evaluation runner reads from the same file.
const KNOWN_FOREIGN_KEYS: &[&str] = &["metrics", "evaluators", "dataset", "model", "judge"];

/// Loads the score registry from a JSON or YAML file.
///
/// In `strict` mode unknown top-level keys are an error; otherwise they are
/// logged and skipped.
pub fn load_score_registry(path: &Path, strict: bool) -> Result<ScoreRegistry, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read score config {}: {}", path.display(), e)))?;

    let mut ignored_keys = BTreeSet::new();

    // serde_ignored wrapper to capture unknown fields
    let cfg: ScoreConfigFile = if is_yaml(path) {
        let de = serde_yaml::Deserializer::from_str(&raw);
        serde_ignored::deserialize(de, |p| {
            ignored_keys.insert(p.to_string());
        })
        .map_err(|e| ConfigError(format!("failed to parse YAML {}: {}", path.display(), e)))?
    } else {
        let mut de = serde_json::Deserializer::from_str(&raw);
        let cfg = serde_ignored::deserialize(&mut de, |p| {
            ignored_keys.insert(p.to_string());
        })
        .map_err(|e| ConfigError(format!("failed to parse JSON {}: {}", path.display(), e)))?;
        de.end()
            .map_err(|e| ConfigError(format!("trailing data in {}: {}", path.display(), e)))?;
        cfg
    };

    let unknown: Vec<_> = ignored_keys
        .iter()
        .filter(|k| !KNOWN_FOREIGN_KEYS.contains(&k.as_str()) && !k.starts_with('_'))
        .collect();
    if !unknown.is_empty() {
        if strict {
            return Err(ConfigError(format!(
                "Unknown fields detected in strict mode: {:?} (file: {})",
                unknown,
                path.display()
            )));
        }
        tracing::warn!(
            event = "config.unknown_fields",
            fields = ?unknown,
            file = %path.display(),
            "ignored unknown score config fields"
        );
    }

    let scores = cfg
        .scores
        .ok_or_else(|| ConfigError(format!("missing 'scores' in {}", path.display())))?;
    validate_scores(&scores).map_err(|msg| ConfigError(format!("{} (file: {})", msg, path.display())))?;

    if scores.is_empty() {
        tracing::warn!(event = "config.no_scores", file = %path.display(), "score registry is empty");
    }

    Ok(ScoreRegistry::new(scores))
}

fn validate_scores(scores: &[String]) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for (idx, s) in scores.iter().enumerate() {
        if s.trim().is_empty() {
            return Err(format!("scores[{}] is blank", idx));
        }
        if !seen.insert(s.as_str()) {
            return Err(format!("duplicate score name '{}'", s));
        }
    }
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Where the dashboard endpoints live and how to talk to them.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub scores_path: PathBuf,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Applies `EVALBOARD_*` overrides from `lookup` on top of the defaults.
    /// Values that do not parse are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = lookup("EVALBOARD_BASE_URL") {
            cfg.base_url = v;
        }
        if let Some(v) = lookup("EVALBOARD_TIMEOUT_MS") {
            if let Ok(n) = v.parse() {
                cfg.timeout_ms = n;
            }
        }
        if let Some(v) = lookup("EVALBOARD_SCORES") {
            cfg.scores_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("EVALBOARD_LOG") {
            cfg.log_level = v;
        }
        cfg
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"{
  "scores": ["faithfulness", "answer_relevancy", "context_precision", "context_recall"]
}
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
