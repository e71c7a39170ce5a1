use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One commit as logged: identity, author, calendar date, parent linkage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub short_id: String,
    pub author_name: String,
    pub author_email: String,
    /// Calendar date "YYYY-MM-DD", no time component.
    pub date: String,
    pub parent_ids: Vec<String>,
}

/// Per-file line counts attached to a commit by a numstat query.
/// Binary files carry 0/0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDelta {
    pub path: String,
    pub additions: u64,
    pub deletions: u64,
}

/// A commit plus its per-file deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumstatCommit {
    pub commit: Commit,
    pub files: Vec<FileDelta>,
}

/// A local branch as reported by for-each-ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub tip: String,
    pub last_commit_date: String,
}

/// Time/scope filter for history queries. `days` is the legacy window,
/// only applied when neither since nor until is set.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub since: Option<String>,
    pub until: Option<String>,
    pub days: Option<u32>,
    pub author: Option<String>,
    pub all_refs: bool,
}

/// Commit-frequency bucket size. Unknown flag values fall back to daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn parse(value: &str) -> Self {
        match value {
            "weekly" => Granularity::Weekly,
            "monthly" => Granularity::Monthly,
            _ => Granularity::Daily,
        }
    }
}

/// Bucket key -> commit count, ascending by key.
pub type FrequencyMap = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub email: String,
    pub commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    pub name: String,
    pub email: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummary {
    pub name: String,
    pub tip: String,
    pub last_commit_date: String,
    pub last_author: Option<String>,
    pub last_author_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchStats {
    pub branch: String,
    pub commits: u64,
    pub merges: u64,
    pub authors: u64,
    /// Ascending "name <email>" identities.
    pub author_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub path: String,
    /// Distinct commits touching the path, not the raw delta-row count.
    pub changes: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStat {
    pub directory: String,
    pub changes: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub repo: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub repo_age_days: i64,
    pub generated: String,
}

/// The assembled sections document. Field declaration order is the
/// canonical section order; unrequested sections stay `None` and are
/// omitted from output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<Contributor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_stats: Option<Vec<ContributorStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_frequency: Option<FrequencyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_frequency_by_author: Option<BTreeMap<String, FrequencyMap>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_frequency_by_branch: Option<BTreeMap<String, u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BranchSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_stats: Option<Vec<BranchStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_commits: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_commits_per_day: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_distribution: Option<FrequencyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_stats: Option<Vec<FileStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_stats: Option<Vec<DirectoryStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}
