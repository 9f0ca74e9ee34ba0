use crate::model::{KnowledgeBase, SeriesPoint, TimeSeries};
use chrono::{DateTime, SecondsFormat};
use std::collections::BTreeSet;

const FILE_HEADERS: [&str; 4] = ["File Name", "File Type", "Date uploaded", "Time uploaded"];

pub fn render_series(chatbot: Option<&str>, series: &[TimeSeries]) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "Metrics for {} ({} series)\n",
        chatbot.unwrap_or("<no chatbot>"),
        series.len()
    ));

    let width = series.iter().map(|ts| ts.name.len()).max().unwrap_or(0).max(6);
    for ts in series {
        s.push_str(&format!("  {:<width$}  {:>4} points", ts.name, ts.data.len(), width = width));
        if let (Some(first), Some(last)) = (ts.data.first(), ts.data.last()) {
            s.push_str(&format!("  first {}", point(first)));
            if ts.data.len() > 1 {
                s.push_str(&format!("  last {}", point(last)));
            }
        }
        s.push('\n');
    }
    s
}

fn point(p: &SeriesPoint) -> String {
    let at = p
        .timestamp_ms()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "?".into());
    let value = p
        .value()
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".into());
    format!("{}={}", at, value)
}

/// File names that appear more than once. Table rows are keyed by file name,
/// so such files are indistinguishable downstream.
pub fn duplicate_file_names(kb: &KnowledgeBase) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for f in &kb.files {
        if !seen.insert(f.file_name.as_str()) {
            dups.insert(f.file_name.as_str());
        }
    }
    dups.into_iter().collect()
}

pub fn render_knowledge_base(kb: &KnowledgeBase) -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n\nFiles\n", kb.kb_name));

    let rows: Vec<[&str; 4]> = kb
        .files
        .iter()
        .map(|f| {
            [
                f.file_name.as_str(),
                f.content_type.as_str(),
                f.date_uploaded.as_str(),
                f.time_uploaded.as_str(),
            ]
        })
        .collect();

    let mut widths = FILE_HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    s.push_str(&table_row(&FILE_HEADERS, &widths));
    let rule = widths.map(|w| "-".repeat(w));
    s.push_str(&table_row(&rule.each_ref().map(String::as_str), &widths));
    if rows.is_empty() {
        s.push_str("No files uploaded\n");
    }
    for row in &rows {
        s.push_str(&table_row(row, &widths));
    }
    s
}

fn table_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KnowledgeBaseFile;

    fn file(name: &str) -> KnowledgeBaseFile {
        KnowledgeBaseFile {
            file_name: name.into(),
            content_type: "application/pdf".into(),
            date_uploaded: "2024-05-01".into(),
            time_uploaded: "12:00:00".into(),
        }
    }

    #[test]
    fn empty_catalog_says_so() {
        let kb = KnowledgeBase {
            kb_name: "giraffes".into(),
            files: vec![],
        };
        let out = render_knowledge_base(&kb);
        assert!(out.starts_with("giraffes\n"));
        assert!(out.contains("File Name  File Type  Date uploaded  Time uploaded"));
        assert!(out.contains("No files uploaded"));
    }

    #[test]
    fn files_are_listed_in_order() {
        let kb = KnowledgeBase {
            kb_name: "giraffes".into(),
            files: vec![file("b.pdf"), file("a.pdf")],
        };
        let out = render_knowledge_base(&kb);
        let b = out.find("b.pdf").unwrap();
        let a = out.find("a.pdf").unwrap();
        assert!(b < a);
        assert!(!out.contains("No files uploaded"));
    }

    #[test]
    fn reports_duplicate_names() {
        let kb = KnowledgeBase {
            kb_name: "kb".into(),
            files: vec![file("a.pdf"), file("b.pdf"), file("a.pdf")],
        };
        assert_eq!(duplicate_file_names(&kb), vec!["a.pdf"]);
    }

    #[test]
    fn series_summary_shows_first_and_last() {
        let series = vec![
            TimeSeries {
                name: "accuracy".into(),
                data: vec![
                    SeriesPoint(Some(1704067200000), Some(0.9)),
                    SeriesPoint(Some(1704153600000), None),
                ],
            },
            TimeSeries::empty("latency"),
        ];
        let out = render_series(Some("bot1"), &series);
        assert!(out.starts_with("Metrics for bot1 (2 series)\n"));
        assert!(out.contains("first 2024-01-01T00:00:00Z=0.90"));
        assert!(out.contains("last 2024-01-02T00:00:00Z=-"));
        assert!(out.contains("latency      0 points"));
    }
}
