use crate::error::Result;
use crate::git::parse::FIELD_SEP;
use crate::git::GitRepo;
use crate::model::{Branch, BranchStats, LogFilter};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, BTreeSet};

/// Per-branch commit, merge, and author statistics under the same time
/// window. One sequential accessor call per figure; a failing call
/// aborts the whole scan.
pub fn branch_stats(
    repo: &GitRepo,
    branches: &[Branch],
    filter: &LogFilter,
) -> Result<Vec<BranchStats>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut stats = Vec::with_capacity(branches.len());
    for branch in branches {
        pb.set_message(format!("Scanning branch {}...", branch.name));
        let commits = repo.rev_list_count(&branch.name, false, filter)?;
        let merges = repo.rev_list_count(&branch.name, true, filter)?;
        let authors = author_identities(&repo.branch_authors_raw(&branch.name, filter)?);
        stats.push(BranchStats {
            branch: branch.name.clone(),
            commits,
            merges,
            authors: authors.len() as u64,
            author_list: authors.into_iter().collect(),
        });
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(stats)
}

/// Branch name -> reachable commit count inside the time window.
pub fn branch_commit_counts(
    repo: &GitRepo,
    branches: &[Branch],
    filter: &LogFilter,
) -> Result<BTreeMap<String, u64>> {
    let mut counts = BTreeMap::new();
    for branch in branches {
        let count = repo.rev_list_count(&branch.name, false, filter)?;
        counts.insert(branch.name.clone(), count);
    }
    Ok(counts)
}

/// Distinct "name <email>" identities from raw author lines, ascending.
fn author_identities(raw: &str) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }
        match line.split_once(FIELD_SEP) {
            Some((name, email)) => set.insert(format!("{name} <{email}>")),
            None => set.insert(line.to_string()),
        };
    }
    set
}
