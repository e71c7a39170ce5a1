//! Decoders for raw `git log` text.

use crate::model::{Commit, FileDelta, NumstatCommit};

/// Field delimiter used in log pretty formats. U+0001 cannot appear in
/// author names, emails, or short dates.
pub const FIELD_SEP: char = '\u{1}';

/// Prefix token marking a commit header line in numstat output.
pub const NUMSTAT_HEADER: &str = "commit\u{1}";

pub fn basic_log_format() -> String {
    let s = FIELD_SEP;
    format!("%H{s}%h{s}%an{s}%ae{s}%ad{s}%P")
}

pub fn numstat_log_format() -> String {
    let s = FIELD_SEP;
    format!("commit{s}%H{s}%h{s}%an{s}%ae{s}%ad{s}%P")
}

/// Parse basic log output into commits, most recent first. A line with
/// fewer than six fields is skipped.
pub fn parse_log(raw: &str) -> Vec<Commit> {
    let mut commits = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(FIELD_SEP).collect();
        if fields.len() < 6 {
            continue;
        }
        commits.push(commit_from_fields(&fields));
    }
    commits
}

/// Parse numstat log output: one header line per commit followed by
/// zero or more tab-separated delta lines. A "-" count (binary file)
/// decodes as 0; lines that are neither a header nor a three-field
/// delta are skipped.
pub fn parse_numstat(raw: &str) -> Vec<NumstatCommit> {
    let mut commits = Vec::new();
    let mut current: Option<NumstatCommit> = None;
    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix(NUMSTAT_HEADER) {
            if let Some(done) = current.take() {
                commits.push(done);
            }
            let fields: Vec<&str> = rest.split(FIELD_SEP).collect();
            if fields.len() < 6 {
                continue;
            }
            current = Some(NumstatCommit {
                commit: commit_from_fields(&fields),
                files: Vec::new(),
            });
        } else if !line.trim().is_empty() {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 3 {
                continue;
            }
            if let Some(entry) = current.as_mut() {
                entry.files.push(FileDelta {
                    path: fields[2].to_string(),
                    additions: fields[0].parse().unwrap_or(0),
                    deletions: fields[1].parse().unwrap_or(0),
                });
            }
        }
    }
    if let Some(done) = current.take() {
        commits.push(done);
    }
    commits
}

fn commit_from_fields(fields: &[&str]) -> Commit {
    Commit {
        id: fields[0].to_string(),
        short_id: fields[1].to_string(),
        author_name: fields[2].to_string(),
        author_email: fields[3].to_string(),
        date: fields[4].to_string(),
        parent_ids: fields[5].split_whitespace().map(str::to_string).collect(),
    }
}
