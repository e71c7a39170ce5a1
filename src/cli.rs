use crate::error::GitvizError;
use crate::git::GitRepo;
use crate::model::{Granularity, LogFilter};
use crate::output::{self, Format};
use crate::report::{self, Request};
use crate::util::today;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitviz")]
#[command(about = "Git history statistics with plain-text or JSON output")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(long, help = "List contributors (name, email, commits)")]
    pub contributors: bool,

    #[arg(long, value_name = "N", help = "Top N contributors (implies --contributors)")]
    pub top: Option<usize>,

    #[arg(long, help = "Commits, lines added, lines removed per author")]
    pub contributor_stats: bool,

    #[arg(
        long,
        value_name = "GRANULARITY",
        num_args = 0..=1,
        default_missing_value = "daily",
        help = "Commit counts per daily|weekly|monthly bucket"
    )]
    pub commit_frequency: Option<String>,

    #[arg(long, help = "Per-author daily commit counts")]
    pub commit_frequency_by_author: bool,

    #[arg(long, help = "Commits per branch (time filtered)")]
    pub commit_frequency_by_branch: bool,

    #[arg(long, help = "List local branches (name, tip, last commit, last author)")]
    pub branches: bool,

    #[arg(long, help = "Commits, merges, unique authors per branch")]
    pub branch_stats: bool,

    #[arg(long, help = "Total commits in range")]
    pub total_commits: bool,

    #[arg(long, help = "Average commits per day in range")]
    pub average_commits_per_day: bool,

    #[arg(long, help = "Daily commit counts (date -> count)")]
    pub commit_distribution: bool,

    #[arg(long, help = "Stats per file (changes, additions, deletions)")]
    pub file_stats: bool,

    #[arg(long, help = "Aggregated stats per directory")]
    pub directory_stats: bool,

    #[arg(long, help = "Include meta (repo, since, until, age, generated)")]
    pub meta: bool,

    #[arg(long, value_enum, default_value_t = Format::Text, help = "Output format")]
    pub format: Format,

    #[arg(long, help = "Shorthand for --format json")]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Include all refs")]
    pub all: bool,

    #[arg(long, help = "Filter by author (git regex)")]
    pub author: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Start date inclusive")]
    pub since: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "End date inclusive")]
    pub until: Option<String>,

    #[arg(
        long,
        value_name = "N",
        help = "(Legacy) last n days when no explicit range is given"
    )]
    pub days: Option<u32>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let request = self.to_request();
        if request.is_empty() {
            Cli::command().print_help()?;
            return Ok(());
        }

        let repo = GitRepo::open(self.common.repo.as_deref())
            .context("Failed to open git repository")?;
        let filter = resolve_filter(&self.common)?;
        let report = report::build(&repo, &filter, &request)?;

        let format = if self.json { Format::Json } else { self.format };
        print!("{}", output::render(&report, format)?);
        Ok(())
    }

    fn to_request(&self) -> Request {
        Request {
            contributors: self.contributors,
            top: self.top,
            contributor_stats: self.contributor_stats,
            commit_frequency: self.commit_frequency.as_deref().map(Granularity::parse),
            commit_frequency_by_author: self.commit_frequency_by_author,
            commit_frequency_by_branch: self.commit_frequency_by_branch,
            branches: self.branches,
            branch_stats: self.branch_stats,
            total_commits: self.total_commits,
            average_commits_per_day: self.average_commits_per_day,
            commit_distribution: self.commit_distribution,
            file_stats: self.file_stats,
            directory_stats: self.directory_stats,
            meta: self.meta,
        }
    }
}

/// Apply the window defaults: no filter at all means the last 30 days;
/// an open-ended since runs to today; a bare until with a day count
/// opens the window backwards. A zero day count is ignored.
fn resolve_filter(common: &CommonArgs) -> Result<LogFilter> {
    let mut since = common.since.clone();
    let mut until = common.until.clone();
    let mut days = common.days.filter(|d| *d > 0);

    if since.is_none() && until.is_none() && days.is_none() {
        days = Some(30);
    }
    if since.is_some() && until.is_none() {
        until = Some(today());
    }
    if until.is_some() && since.is_none() {
        if let Some(d) = days {
            let end = until.as_deref().unwrap_or_default();
            let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
                .map_err(|_| GitvizError::InvalidDate(end.to_string()))?;
            let start = end - chrono::Duration::days(d as i64 - 1);
            since = Some(start.format("%Y-%m-%d").to_string());
        }
    }

    Ok(LogFilter {
        since,
        until,
        days,
        author: common.author.clone(),
        all_refs: common.all,
    })
}
