use crate::error::Result;
use crate::model::Report;
use clap::ValueEnum;
use serde_json::Value;

/// Caller-selected encoding for the assembled report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Flattened grep-friendly `key: value` lines.
    #[default]
    Text,
    /// Structured document preserving the nested section shapes.
    Json,
}

pub fn render(report: &Report, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(report)?;
            out.push('\n');
            Ok(out)
        }
        Format::Text => render_plain(report),
    }
}

/// Flattened line mode: one logical fact per line. This is lossy for
/// nesting beyond one level and is not meant to round-trip; the JSON
/// mode is the faithful encoding. The meta block, when present, prints
/// first, separated from the sections by a blank line.
fn render_plain(report: &Report) -> Result<String> {
    let sections = match serde_json::to_value(report)? {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    let mut lines = Vec::new();
    if let Some(Value::Object(meta)) = sections.get("meta") {
        for (key, value) in meta {
            lines.push(format!("{key}: {}", scalar(value)));
        }
        if sections.len() > 1 {
            lines.push(String::new());
        }
    }
    for (key, value) in &sections {
        if key == "meta" {
            continue;
        }
        emit(&mut lines, key, value, 1);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// Flatten one value into `key: value` lines.
///
/// Arrays of primitives keep a `key[index]` prefix; arrays of mappings
/// drop it and print bare fields, entries separated by a blank line.
/// Top-level mappings whose values are all primitive drop the section
/// prefix (frequency maps print bare date lines); mixed mappings use
/// `key.sub` paths. Two shapes get dedicated rules: `authorList`
/// string arrays print one `author:` line per identity, and the
/// author-keyed `commitFrequencyByAuthor` mapping prints an `author:`
/// header followed by its date lines.
fn emit(lines: &mut Vec<String>, key: &str, value: &Value, depth: usize) {
    match value {
        Value::Null => lines.push(format!("{key}: null")),
        Value::Array(items) => {
            if items.is_empty() {
                lines.push(format!("{key}: []"));
                return;
            }
            if key == "authorList" && items.iter().all(Value::is_string) {
                for item in items {
                    lines.push(format!("author: {}", item.as_str().unwrap_or_default()));
                }
                return;
            }
            let last = items.len() - 1;
            for (idx, item) in items.iter().enumerate() {
                let base = format!("{key}[{idx}]");
                match item {
                    Value::Null => lines.push(format!("{base}: null")),
                    Value::Array(inner) => {
                        if inner.is_empty() {
                            lines.push(format!("{base}: []"));
                        } else {
                            for (j, v) in inner.iter().enumerate() {
                                emit(lines, &format!("{base}[{j}]"), v, depth + 1);
                            }
                        }
                    }
                    Value::Object(fields) => {
                        if fields.is_empty() {
                            lines.push(format!("{base}: {{}}"));
                        } else {
                            for (k, v) in fields {
                                emit(lines, k, v, depth + 1);
                            }
                        }
                    }
                    other => lines.push(format!("{base}: {}", scalar(other))),
                }
                if idx != last {
                    lines.push(String::new());
                }
            }
        }
        Value::Object(fields) => {
            if key == "commitFrequencyByAuthor"
                && depth == 1
                && !fields.is_empty()
                && fields.values().all(Value::is_object)
            {
                let last = fields.len() - 1;
                for (idx, (author, dates)) in fields.iter().enumerate() {
                    lines.push(format!("author: {author}"));
                    if let Value::Object(dates) = dates {
                        let mut keys: Vec<&String> = dates.keys().collect();
                        keys.sort();
                        for date in keys {
                            lines.push(format!("{date}: {}", scalar(&dates[date])));
                        }
                    }
                    if idx != last {
                        lines.push(String::new());
                    }
                }
                return;
            }
            if fields.is_empty() {
                lines.push(format!("{key}: {{}}"));
                return;
            }
            let all_primitive =
                depth == 1 && fields.values().all(|v| !v.is_object() && !v.is_array());
            if all_primitive {
                for (k, v) in fields {
                    emit(lines, k, v, depth + 1);
                }
            } else {
                for (k, v) in fields {
                    emit(lines, &format!("{key}.{k}"), v, depth + 1);
                }
            }
        }
        other => lines.push(format!("{key}: {}", scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
