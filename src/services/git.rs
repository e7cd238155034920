// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::PendingDiff;
use crate::error::{Error, Result};

pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Diff for the next commit: the staged changes, or the unstaged ones
    /// when nothing is staged. Both empty is not an error.
    pub async fn pending_diff(&self) -> Result<PendingDiff> {
        // Outside a repository `git diff` switches to --no-index mode and
        // rejects --cached with a usage error, so check up front.
        self.ensure_work_tree().await?;

        let staged = self.run(&["diff", "--cached", "--no-ext-diff"]).await?;
        if !staged.trim().is_empty() {
            debug!(bytes = staged.len(), "using staged diff");
            return Ok(PendingDiff::Staged(staged));
        }

        let unstaged = self.run(&["diff", "--no-ext-diff"]).await?;
        if !unstaged.trim().is_empty() {
            warn!(
                bytes = unstaged.len(),
                "no staged changes, falling back to unstaged diff"
            );
            return Ok(PendingDiff::Unstaged(unstaged));
        }

        debug!("no staged or unstaged changes");
        Ok(PendingDiff::Empty)
    }

    async fn ensure_work_tree(&self) -> Result<()> {
        let out = self.run(&["rev-parse", "--is-inside-work-tree"]).await?;
        if out.trim() != "true" {
            return Err(Error::NotAGitRepo);
        }
        Ok(())
    }

    /// The repository's git directory (usually `.git`), as an absolute path.
    pub async fn git_dir(&self) -> Result<PathBuf> {
        let out = self.run(&["rev-parse", "--absolute-git-dir"]).await?;
        Ok(PathBuf::from(out.trim()))
    }

    pub async fn commit(&self, message: &str) -> Result<()> {
        let mut child = Command::new("git")
            .args(["commit", "-F", "-"])
            .current_dir(&self.work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(Error::GitUnavailable)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(message.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.trim().to_string()));
        }

        Ok(())
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(Error::GitUnavailable)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.to_lowercase().contains("not a git repository") {
                return Err(Error::NotAGitRepo);
            }
            return Err(Error::Git(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
