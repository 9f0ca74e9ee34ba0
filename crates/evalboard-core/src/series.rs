//! Reshapes evaluation-run history into one chart series per score.
//!
//! The output always carries exactly one [`TimeSeries`] per registered score,
//! in registry order, so chart consumers never deal with a missing series.

use crate::model::{Chatbot, EvaluationRunRecord, SeriesPoint, TimeSeries};
use crate::registry::ScoreRegistry;
use crate::time::parse_time_to_millis;

/// Builds the series for `chatbot` out of `records`.
///
/// With no chatbot the registry-shaped empty series are returned and `records`
/// is not looked at. Otherwise records of other chatbots are dropped and every
/// remaining record contributes one point to every series, in input order. A
/// score the run did not record yields a point with an absent value.
pub fn build(
    registry: &ScoreRegistry,
    records: &[EvaluationRunRecord],
    chatbot: Option<&Chatbot>,
) -> Vec<TimeSeries> {
    let mut series: Vec<TimeSeries> = registry.iter().map(TimeSeries::empty).collect();

    let Some(chatbot) = chatbot else {
        return series;
    };

    let mut unparsed_times = 0usize;
    for record in records.iter().filter(|r| r.belongs_to(chatbot)) {
        let ts = parse_time_to_millis(&record.time);
        if ts.is_none() {
            unparsed_times += 1;
        }
        for (s, name) in series.iter_mut().zip(registry.iter()) {
            s.data.push(SeriesPoint(ts, record.score(name)));
        }
    }

    if unparsed_times > 0 {
        tracing::warn!(
            event = "series.unparsed_time",
            chatbot_id = %chatbot.id,
            count = unparsed_times,
            "run records with unparseable time"
        );
    }

    series
}
