use crate::model::{Commit, Contributor, ContributorStats, NumstatCommit};
use std::collections::HashMap;

/// Group commits by (name, email) identity and count them, most active
/// first. Ties order by name then email so output is deterministic.
pub fn contributors(commits: &[Commit]) -> Vec<Contributor> {
    let mut counts: HashMap<(String, String), u64> = HashMap::new();
    for c in commits {
        *counts
            .entry((c.author_name.clone(), c.author_email.clone()))
            .or_insert(0) += 1;
    }

    let mut list: Vec<Contributor> = counts
        .into_iter()
        .map(|((name, email), commits)| Contributor { name, email, commits })
        .collect();
    list.sort_by(|a, b| {
        b.commits
            .cmp(&a.commits)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.email.cmp(&b.email))
    });
    list
}

/// Same grouping over numstat records, summing each commit's per-file
/// additions and deletions.
pub fn contributor_line_stats(commits: &[NumstatCommit]) -> Vec<ContributorStats> {
    let mut stats: HashMap<(String, String), ContributorStats> = HashMap::new();
    for entry in commits {
        let c = &entry.commit;
        let slot = stats
            .entry((c.author_name.clone(), c.author_email.clone()))
            .or_insert_with(|| ContributorStats {
                name: c.author_name.clone(),
                email: c.author_email.clone(),
                commits: 0,
                additions: 0,
                deletions: 0,
            });
        slot.commits += 1;
        for f in &entry.files {
            slot.additions += f.additions;
            slot.deletions += f.deletions;
        }
    }

    let mut list: Vec<ContributorStats> = stats.into_values().collect();
    list.sort_by(|a, b| {
        b.commits
            .cmp(&a.commits)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.email.cmp(&b.email))
    });
    list
}
