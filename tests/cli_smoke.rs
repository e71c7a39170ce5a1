use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    // init and basic identity
    assert!(Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "core.autocrlf", "false"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.email", "you@example.com"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.name", "Your Name"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_file_as(dir: &Path, name: &str, content: &str, author: (&str, &str), date: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    let stamp = format!("{date} 12:00:00 +0000");
    assert!(Command::new("git")
        .args([
            "-c",
            &format!("user.name={}", author.0),
            "-c",
            &format!("user.email={}", author.1),
            "commit",
            "-m",
            &format!("add {name}"),
        ])
        .env("GIT_AUTHOR_DATE", &stamp)
        .env("GIT_COMMITTER_DATE", &stamp)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn seed_three_commits(dir: &Path) {
    commit_file_as(dir, "one.txt", "1\n", ("A", "a@example.com"), "2025-01-01");
    commit_file_as(dir, "two.txt", "2\n", ("B", "b@example.com"), "2025-01-01");
    commit_file_as(dir, "three.txt", "3\n", ("A", "a@example.com"), "2025-01-02");
}

#[test]
fn contributors_and_daily_frequency_json() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--contributors",
            "--commit-frequency",
            "--json",
            "--since",
            "2025-01-01",
            "--until",
            "2025-01-07",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["contributors"][0]["name"], "A");
    assert_eq!(v["contributors"][0]["commits"], 2);
    assert_eq!(v["contributors"][1]["name"], "B");
    assert_eq!(v["contributors"][1]["commits"], 1);
    assert_eq!(v["commitFrequency"]["2025-01-01"], 2);
    assert_eq!(v["commitFrequency"]["2025-01-02"], 1);
}

#[test]
fn top_limits_the_contributor_list() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--top",
            "1",
            "--json",
            "--since",
            "2025-01-01",
            "--until",
            "2025-01-07",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let list = v["contributors"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "A");
}

#[test]
fn weekly_buckets_follow_the_day_of_year_rule() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_file_as(
        dir.path(),
        "year-end.txt",
        "x\n",
        ("A", "a@example.com"),
        "2024-12-30",
    );

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--commit-frequency",
            "weekly",
            "--json",
            "--since",
            "2024-12-01",
            "--until",
            "2025-01-05",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    // ISO-8601 would file 2024-12-30 under 2025-W01.
    assert_eq!(v["commitFrequency"]["2024-W53"], 1);
    assert!(v["commitFrequency"].get("2025-W01").is_none());
}

#[test]
fn file_and_directory_stats_group_paths() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_file_as(dir.path(), "src/a.js", "a\n", ("A", "a@example.com"), "2025-01-01");
    commit_file_as(dir.path(), "src/b.js", "b\n", ("A", "a@example.com"), "2025-01-01");
    commit_file_as(dir.path(), "README.md", "r\n", ("B", "b@example.com"), "2025-01-02");

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--file-stats",
            "--directory-stats",
            "--json",
            "--since",
            "2025-01-01",
            "--until",
            "2025-01-07",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let files = v["fileStats"].as_array().unwrap();
    assert_eq!(files.len(), 3);

    let dirs = v["directoryStats"].as_array().unwrap();
    let src = dirs
        .iter()
        .find(|d| d["directory"] == "src")
        .expect("src directory entry");
    assert_eq!(src["changes"], 2);
    let top = dirs
        .iter()
        .find(|d| d["directory"] == ".")
        .expect("top-level entry");
    assert_eq!(top["changes"], 1);
}

#[test]
fn branch_stats_list_sorted_author_identities() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--branch-stats",
            "--json",
            "--since",
            "2025-01-01",
            "--until",
            "2025-01-07",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let stats = &v["branchStats"][0];
    assert_eq!(stats["commits"], 3);
    assert_eq!(stats["merges"], 0);
    assert_eq!(stats["authors"], 2);
    let authors: Vec<&str> = stats["authorList"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_str().unwrap())
        .collect();
    assert_eq!(authors, vec!["A <a@example.com>", "B <b@example.com>"]);
}

#[test]
fn plain_text_flattens_contributor_entries() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--contributors",
            "--format",
            "text",
            "--since",
            "2025-01-01",
            "--until",
            "2025-01-07",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();

    let expected = "\
name: A
email: a@example.com
commits: 2

name: B
email: b@example.com
commits: 1
";
    assert_eq!(text, expected);
}

#[test]
fn section_order_is_independent_of_flag_order() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let window = ["--since", "2025-01-01", "--until", "2025-01-07", "--json"];

    let mut first = Command::cargo_bin("gitviz").unwrap();
    first
        .arg("--repo")
        .arg(dir.path())
        .args(["--total-commits", "--contributors"])
        .args(window);
    let out1 = first.assert().success().get_output().stdout.clone();

    let mut second = Command::cargo_bin("gitviz").unwrap();
    second
        .arg("--repo")
        .arg(dir.path())
        .args(["--contributors", "--total-commits"])
        .args(window);
    let out2 = second.assert().success().get_output().stdout.clone();

    assert_eq!(out1, out2);

    let text = String::from_utf8(out1).unwrap();
    let contributors_at = text.find("\"contributors\"").unwrap();
    let total_at = text.find("\"totalCommits\"").unwrap();
    assert!(contributors_at < total_at);
}

#[test]
fn commits_outside_the_window_yield_empty_sections() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--total-commits",
            "--contributors",
            "--average-commits-per-day",
            "--json",
            "--since",
            "2030-01-01",
            "--until",
            "2030-01-02",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["totalCommits"], 0);
    assert_eq!(v["contributors"].as_array().unwrap().len(), 0);
    assert_eq!(v["averageCommitsPerDay"], 0.0);
}

#[test]
fn meta_prints_first_in_text_mode() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    seed_three_commits(dir.path());

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo")
        .arg(dir.path())
        .args([
            "--meta",
            "--total-commits",
            "--format",
            "text",
            "--since",
            "2025-01-01",
            "--until",
            "2025-01-07",
        ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("repo: "));
    assert_eq!(lines[1], "since: 2025-01-01");
    assert_eq!(lines[2], "until: 2025-01-07");
    assert!(lines[3].starts_with("repoAgeDays: "));
    assert!(lines[4].starts_with("generated: "));
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "totalCommits: 3");
}

#[test]
fn rejects_a_directory_that_is_not_a_repository() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }

    let mut cmd = Command::cargo_bin("gitviz").unwrap();
    cmd.arg("--repo").arg(dir.path()).arg("--contributors");
    let out = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("Not a git repository"));
}
