// src/output/csv.rs
//! CSV rendering: one row per idea, categories joined into a single cell,
//! RFC 4180 quoting. An empty run renders to an empty string, matching the
//! files existing consumers already parse.

use crate::process::types::RunResult;

const HEADER: &str = "text,source,categories,sentiment,word_count,timestamp";

pub fn render(result: &RunResult) -> String {
    if result.ideas.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\r\n");

    for idea in &result.ideas {
        let categories = idea
            .categories
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let row = [
            escape(&idea.text),
            idea.source.to_string(),
            escape(&categories),
            format!("{}", idea.sentiment),
            idea.word_count.to_string(),
            idea.timestamp.to_rfc3339(),
        ];
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
