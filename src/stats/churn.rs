use crate::model::{DirectoryStat, FileStat, NumstatCommit};
use std::collections::{HashMap, HashSet};

/// Per-path change statistics. `changes` counts distinct commits
/// touching the path; duplicate delta rows inside one commit still sum
/// their line counts but count as a single change.
pub fn file_stats(commits: &[NumstatCommit]) -> Vec<FileStat> {
    let mut map: HashMap<String, FileStat> = HashMap::new();
    for entry in commits {
        let mut seen: HashSet<&str> = HashSet::new();
        for f in &entry.files {
            let stat = map.entry(f.path.clone()).or_insert_with(|| FileStat {
                path: f.path.clone(),
                changes: 0,
                additions: 0,
                deletions: 0,
            });
            stat.additions += f.additions;
            stat.deletions += f.deletions;
            if seen.insert(f.path.as_str()) {
                stat.changes += 1;
            }
        }
    }

    let mut list: Vec<FileStat> = map.into_values().collect();
    list.sort_by(|a, b| {
        b.changes
            .cmp(&a.changes)
            .then_with(|| (b.additions + b.deletions).cmp(&(a.additions + a.deletions)))
            .then_with(|| a.path.cmp(&b.path))
    });
    list
}

/// Sum file stats per parent directory, same ordering rule.
pub fn directory_stats(files: &[FileStat]) -> Vec<DirectoryStat> {
    let mut map: HashMap<String, DirectoryStat> = HashMap::new();
    for f in files {
        let dir = parent_dir(&f.path);
        let stat = map.entry(dir.to_string()).or_insert_with(|| DirectoryStat {
            directory: dir.to_string(),
            changes: 0,
            additions: 0,
            deletions: 0,
        });
        stat.changes += f.changes;
        stat.additions += f.additions;
        stat.deletions += f.deletions;
    }

    let mut list: Vec<DirectoryStat> = map.into_values().collect();
    list.sort_by(|a, b| {
        b.changes
            .cmp(&a.changes)
            .then_with(|| (b.additions + b.deletions).cmp(&(a.additions + a.deletions)))
            .then_with(|| a.directory.cmp(&b.directory))
    });
    list
}

/// Path up to the last separator, or "." for top-level files.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => ".",
    }
}
