use crate::error::{GitvizError, Result};
use crate::git::parse::{basic_log_format, numstat_log_format, FIELD_SEP};
use crate::model::{Branch, LogFilter};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Read-only accessor for one repository. Every query spawns a `git`
/// child process and blocks on it; calls are strictly sequential.
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or the current directory if `None`.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !path.exists() {
            return Err(GitvizError::InvalidRepository(path));
        }

        let probe = Command::new("git")
            .current_dir(&path)
            .args(["rev-parse", "--is-inside-work-tree"])
            .output()?;
        if !probe.status.success() {
            return Err(GitvizError::InvalidRepository(path));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run(&self, args: &[String]) -> Result<String> {
        let output = Command::new("git")
            .current_dir(&self.path)
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut diagnostic = stderr.trim().to_string();
            if diagnostic.is_empty() {
                diagnostic = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            if diagnostic.is_empty() {
                diagnostic = "git command failed".to_string();
            }
            return Err(GitvizError::Command(diagnostic));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Raw basic log text: one delimiter-separated record per line.
    pub fn log_raw(&self, filter: &LogFilter) -> Result<String> {
        let mut args = vec![
            "log".to_string(),
            "--date=short".to_string(),
            format!("--pretty=format:{}", basic_log_format()),
        ];
        if filter.all_refs {
            args.insert(1, "--all".to_string());
        }
        if let Some(author) = &filter.author {
            args.push(format!("--author={author}"));
        }
        args.extend(time_args(filter));
        self.run(&args)
    }

    /// Raw numstat log text: header line per commit plus delta lines.
    pub fn log_numstat_raw(&self, filter: &LogFilter) -> Result<String> {
        let mut args = vec![
            "log".to_string(),
            "--date=short".to_string(),
            format!("--pretty=format:{}", numstat_log_format()),
            "--numstat".to_string(),
        ];
        if filter.all_refs {
            args.insert(1, "--all".to_string());
        }
        if let Some(author) = &filter.author {
            args.push(format!("--author={author}"));
        }
        args.extend(time_args(filter));
        self.run(&args)
    }

    /// Local branches with tip short id and last commit date.
    pub fn local_branches(&self) -> Result<Vec<Branch>> {
        let out = self.run(&[
            "for-each-ref".to_string(),
            "--format".to_string(),
            "%(refname:short)\t%(objectname:short)\t%(committerdate:short)".to_string(),
            "refs/heads".to_string(),
        ])?;

        let mut branches = Vec::new();
        for line in out.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split('\t');
            if let (Some(name), Some(tip), Some(date)) = (parts.next(), parts.next(), parts.next())
            {
                branches.push(Branch {
                    name: name.to_string(),
                    tip: tip.to_string(),
                    last_commit_date: date.to_string(),
                });
            }
        }
        Ok(branches)
    }

    /// Count of commits reachable from `rev` inside the time window,
    /// optionally restricted to merge commits.
    pub fn rev_list_count(&self, rev: &str, merges_only: bool, filter: &LogFilter) -> Result<u64> {
        let mut args = vec!["rev-list".to_string(), rev.to_string()];
        if merges_only {
            args.push("--merges".to_string());
        }
        args.push("--count".to_string());
        args.extend(time_args(filter));
        let out = self.run(&args)?;
        Ok(out.trim().parse().unwrap_or(0))
    }

    /// Raw author-identity lines ("name<SEP>email") reachable from `rev`.
    pub fn branch_authors_raw(&self, rev: &str, filter: &LogFilter) -> Result<String> {
        let mut args = vec![
            "log".to_string(),
            rev.to_string(),
            format!("--pretty=format:%an{FIELD_SEP}%ae"),
        ];
        args.extend(time_args(filter));
        if let Some(author) = &filter.author {
            args.push(format!("--author={author}"));
        }
        self.run(&args)
    }

    /// Author of the most recent commit on `rev`, if any.
    pub fn last_commit_author(&self, rev: &str) -> Result<Option<(String, String)>> {
        let out = self.run(&[
            "log".to_string(),
            "-1".to_string(),
            format!("--pretty=format:%an{FIELD_SEP}%ae"),
            rev.to_string(),
        ])?;
        let line = out.trim();
        if line.is_empty() {
            return Ok(None);
        }
        Ok(line
            .split_once(FIELD_SEP)
            .map(|(name, email)| (name.to_string(), email.to_string())))
    }

    /// Calendar date of the earliest commit reachable from HEAD.
    /// A repository without commits makes git exit non-zero; that maps
    /// to `None` rather than an error so empty history degrades to
    /// zero-valued sections.
    pub fn first_commit_date(&self) -> Result<Option<String>> {
        let args = vec![
            "log".to_string(),
            "--date=short".to_string(),
            "--pretty=format:%ad".to_string(),
            "--reverse".to_string(),
        ];
        match self.run(&args) {
            Ok(out) => Ok(out
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)),
            Err(GitvizError::Command(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Build `--since`/`--until` arguments from the filter. The legacy
/// `days` window applies only when neither bound is set.
fn time_args(filter: &LogFilter) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(since) = &filter.since {
        args.push(format!("--since={since}"));
    }
    if let Some(until) = &filter.until {
        args.push(format!("--until={until}"));
    }
    if filter.since.is_none() && filter.until.is_none() {
        if let Some(days) = filter.days {
            let end = chrono::Local::now().date_naive();
            let start = end - chrono::Duration::days(days as i64 - 1);
            args.push(format!("--since={}", start.format("%Y-%m-%d")));
            args.push(format!("--until={}", end.format("%Y-%m-%d")));
        }
    }
    args
}
