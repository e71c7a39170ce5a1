use crate::error::Result;
use crate::git::{parse, GitRepo};
use crate::model::{
    BranchSummary, Commit, Granularity, LogFilter, Meta, NumstatCommit, Report,
};
use crate::stats;
use crate::util::{diff_days_inclusive, today};
use chrono::{SecondsFormat, Utc};

/// Which sections the caller asked for. Maps one-to-one onto the
/// front-end flags; the assembler derives the minimal extraction set
/// from it.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub contributors: bool,
    pub top: Option<usize>,
    pub contributor_stats: bool,
    pub commit_frequency: Option<Granularity>,
    pub commit_frequency_by_author: bool,
    pub commit_frequency_by_branch: bool,
    pub branches: bool,
    pub branch_stats: bool,
    pub total_commits: bool,
    pub average_commits_per_day: bool,
    pub commit_distribution: bool,
    pub file_stats: bool,
    pub directory_stats: bool,
    pub meta: bool,
}

impl Request {
    pub fn wants_contributors(&self) -> bool {
        self.contributors || self.top.is_some()
    }

    /// True when no section and no meta block was requested.
    pub fn is_empty(&self) -> bool {
        !(self.wants_contributors()
            || self.contributor_stats
            || self.commit_frequency.is_some()
            || self.commit_frequency_by_author
            || self.commit_frequency_by_branch
            || self.branches
            || self.branch_stats
            || self.total_commits
            || self.average_commits_per_day
            || self.commit_distribution
            || self.file_stats
            || self.directory_stats
            || self.meta)
    }

    /// Sections computed from plain commit records.
    fn needs_basic(&self) -> bool {
        self.wants_contributors()
            || self.commit_frequency.is_some()
            || self.commit_frequency_by_author
            || self.total_commits
            || self.average_commits_per_day
            || self.commit_distribution
    }

    /// Sections that require per-file deltas. The numstat extraction is
    /// never performed speculatively.
    fn needs_numstat(&self) -> bool {
        self.file_stats || self.directory_stats || self.contributor_stats
    }
}

/// Compute every requested section and assemble the report. Section
/// order in the output is the `Report` declaration order, independent
/// of how the request was built.
pub fn build(repo: &GitRepo, filter: &LogFilter, request: &Request) -> Result<Report> {
    let basic = if request.needs_basic() {
        parse::parse_log(&repo.log_raw(filter)?)
    } else {
        Vec::new()
    };
    let numstat = if request.needs_numstat() {
        parse::parse_numstat(&repo.log_numstat_raw(filter)?)
    } else {
        Vec::new()
    };

    let mut report = Report::default();

    if request.wants_contributors() {
        let mut list = stats::contributors(&basic);
        if let Some(top) = request.top {
            list.truncate(top);
        }
        report.contributors = Some(list);
    }
    if request.contributor_stats {
        report.contributor_stats = Some(stats::contributor_line_stats(&numstat));
    }
    if let Some(granularity) = request.commit_frequency {
        report.commit_frequency = Some(stats::frequency(&basic, granularity));
    }
    if request.commit_frequency_by_author {
        report.commit_frequency_by_author = Some(stats::frequency_by_author(&basic));
    }
    if request.commit_frequency_by_branch {
        let branches = repo.local_branches()?;
        report.commit_frequency_by_branch =
            Some(stats::branch_commit_counts(repo, &branches, filter)?);
    }
    if request.branches {
        report.branches = Some(branch_summaries(repo)?);
    }
    if request.branch_stats {
        let branches = repo.local_branches()?;
        report.branch_stats = Some(stats::branch_stats(repo, &branches, filter)?);
    }

    let total = if basic.is_empty() {
        numstat.len() as u64
    } else {
        basic.len() as u64
    };
    if request.total_commits {
        report.total_commits = Some(total);
    }
    if request.average_commits_per_day {
        let (since, until) = effective_range(filter, &basic, &numstat);
        report.average_commits_per_day = Some(match (&since, &until) {
            (Some(s), Some(u)) => stats::average_per_day(total, s, u),
            _ => 0.0,
        });
    }
    if request.commit_distribution {
        report.commit_distribution = Some(stats::frequency(&basic, Granularity::Daily));
    }
    if request.file_stats || request.directory_stats {
        let files = stats::file_stats(&numstat);
        if request.directory_stats {
            report.directory_stats = Some(stats::directory_stats(&files));
        }
        if request.file_stats {
            report.file_stats = Some(files);
        }
    }
    if request.meta {
        let (since, until) = effective_range(filter, &basic, &numstat);
        report.meta = Some(build_meta(repo, since, until)?);
    }

    Ok(report)
}

fn branch_summaries(repo: &GitRepo) -> Result<Vec<BranchSummary>> {
    let mut summaries = Vec::new();
    for branch in repo.local_branches()? {
        let (last_author, last_author_email) = match repo.last_commit_author(&branch.name)? {
            Some((name, email)) => (Some(name), Some(email)),
            None => (None, None),
        };
        summaries.push(BranchSummary {
            name: branch.name,
            tip: branch.tip,
            last_commit_date: branch.last_commit_date,
            last_author,
            last_author_email,
        });
    }
    Ok(summaries)
}

/// Explicit filter bounds, else the span of the fetched commit dates,
/// else (no commits at all, legacy window set) the window itself.
fn effective_range(
    filter: &LogFilter,
    basic: &[Commit],
    numstat: &[NumstatCommit],
) -> (Option<String>, Option<String>) {
    let mut since = filter.since.clone();
    let mut until = filter.until.clone();
    if since.is_some() && until.is_some() {
        return (since, until);
    }

    let mut dates: Vec<&str> = basic.iter().map(|c| c.date.as_str()).collect();
    if dates.is_empty() {
        dates = numstat.iter().map(|c| c.commit.date.as_str()).collect();
    }

    if !dates.is_empty() {
        dates.sort_unstable();
        if since.is_none() {
            since = Some(dates[0].to_string());
        }
        if until.is_none() {
            until = Some(dates[dates.len() - 1].to_string());
        }
    } else if since.is_none() {
        if let Some(days) = filter.days {
            let end = chrono::Local::now().date_naive();
            let start = end - chrono::Duration::days(days as i64 - 1);
            since = Some(start.format("%Y-%m-%d").to_string());
            until = Some(end.format("%Y-%m-%d").to_string());
        }
    }
    (since, until)
}

fn build_meta(repo: &GitRepo, since: Option<String>, until: Option<String>) -> Result<Meta> {
    let repo_age_days = match repo.first_commit_date()? {
        Some(first) => diff_days_inclusive(&first, &today()).unwrap_or(0),
        None => 0,
    };
    Ok(Meta {
        repo: repo.path().display().to_string(),
        since,
        until,
        repo_age_days,
        generated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
