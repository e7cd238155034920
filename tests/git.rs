// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Diff selection against real throwaway repositories.

use std::fs;
use std::path::Path;
use std::process::Command;

use commitgen::domain::PendingDiff;
use commitgen::error::Error;
use commitgen::services::git::GitService;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git must be installed to run these tests");
    assert!(
        status.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&status.stderr)
    );
}

/// A repository with one committed file, `notes.txt`.
fn repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    fs::write(dir.path().join("notes.txt"), "first\n").unwrap();
    git(dir.path(), &["add", "notes.txt"]);
    git(dir.path(), &["commit", "-q", "-m", "init"]);
    dir
}

#[tokio::test]
async fn clean_repository_has_no_pending_diff() {
    let dir = repo();
    let diff = GitService::new(dir.path()).pending_diff().await.unwrap();

    assert_eq!(diff, PendingDiff::Empty);
    assert_eq!(diff.text(), "");
    assert!(diff.is_empty());
}

#[tokio::test]
async fn unstaged_changes_are_used_when_nothing_is_staged() {
    let dir = repo();
    fs::write(dir.path().join("notes.txt"), "first\nsecond\n").unwrap();

    let diff = GitService::new(dir.path()).pending_diff().await.unwrap();

    assert!(matches!(diff, PendingDiff::Unstaged(_)), "got {diff:?}");
    assert!(diff.text().contains("+second"));
}

#[tokio::test]
async fn staged_changes_win_over_unstaged() {
    let dir = repo();
    fs::write(dir.path().join("staged.txt"), "ready\n").unwrap();
    git(dir.path(), &["add", "staged.txt"]);
    fs::write(dir.path().join("notes.txt"), "first\nwork in progress\n").unwrap();

    let diff = GitService::new(dir.path()).pending_diff().await.unwrap();

    assert!(matches!(diff, PendingDiff::Staged(_)), "got {diff:?}");
    assert!(diff.text().contains("+ready"));
    assert!(!diff.text().contains("work in progress"));
}

#[tokio::test]
async fn untracked_files_alone_count_as_no_changes() {
    let dir = repo();
    fs::write(dir.path().join("scratch.txt"), "untracked\n").unwrap();

    let diff = GitService::new(dir.path()).pending_diff().await.unwrap();

    assert_eq!(diff, PendingDiff::Empty);
}

#[tokio::test]
async fn outside_a_repository_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = GitService::new(dir.path()).pending_diff().await.unwrap_err();

    assert!(
        matches!(err, Error::NotAGitRepo | Error::Git(_)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn commit_records_message_and_clears_staged_diff() {
    let dir = repo();
    fs::write(dir.path().join("notes.txt"), "first\nsecond\n").unwrap();
    git(dir.path(), &["add", "notes.txt"]);
    git(dir.path(), &["config", "user.name", "Test"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);

    let service = GitService::new(dir.path());
    service
        .commit("docs(notes): add second line\n\n- extend notes")
        .await
        .unwrap();

    assert_eq!(service.pending_diff().await.unwrap(), PendingDiff::Empty);

    let log = Command::new("git")
        .args(["log", "-1", "--format=%B"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&log.stdout).trim(),
        "docs(notes): add second line\n\n- extend notes"
    );
}

#[tokio::test]
async fn git_dir_points_at_dot_git() {
    let dir = repo();
    let git_dir = GitService::new(dir.path()).git_dir().await.unwrap();

    assert!(git_dir.ends_with(".git"), "got {}", git_dir.display());
    assert!(git_dir.is_absolute());
}
