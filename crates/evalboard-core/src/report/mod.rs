use crate::model::TimeSeries;

pub mod console;

/// Series in the wire shape chart consumers expect:
/// `[{"name": ..., "data": [[ts, value], ...]}, ...]`.
pub fn series_json(series: &[TimeSeries], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(series)
    } else {
        serde_json::to_string(series)
    }
}
