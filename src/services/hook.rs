// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! The `prepare-commit-msg` hook that fills git's message file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const HOOK_NAME: &str = "prepare-commit-msg";
const BACKUP_NAME: &str = "prepare-commit-msg.commitgen-backup";
const MARKER: &str = "# commitgen hook";

const HOOK_SCRIPT: &str = r#"#!/bin/sh
# commitgen hook: auto-generated, do not edit
# Fills the commit message when committing interactively.
# Skips merge, squash, amend, and message-provided commits.

COMMIT_MSG_FILE="$1"
COMMIT_SOURCE="$2"

case "$COMMIT_SOURCE" in
    merge|squash|message|commit)
        exit 0
        ;;
esac

if ! command -v commitgen >/dev/null 2>&1; then
    exit 0
fi

commitgen --yes --message-file "$COMMIT_MSG_FILE" >/dev/null 2>&1 || true
"#;

#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { backup: Option<PathBuf> },
    AlreadyInstalled,
}

#[derive(Debug, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed { restored_backup: bool },
    NotFound,
}

#[derive(Debug, PartialEq, Eq)]
pub enum HookStatus {
    Installed,
    Foreign,
    Missing,
}

pub fn hook_path(hooks_dir: &Path) -> PathBuf {
    hooks_dir.join(HOOK_NAME)
}

fn is_ours(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.contains(MARKER))
        .unwrap_or(false)
}

pub fn install(hooks_dir: &Path) -> Result<InstallOutcome> {
    let hook_path = hook_path(hooks_dir);
    let backup_path = hooks_dir.join(BACKUP_NAME);

    fs::create_dir_all(hooks_dir)?;

    let mut backup = None;
    if hook_path.exists() {
        if is_ours(&hook_path) {
            return Ok(InstallOutcome::AlreadyInstalled);
        }
        fs::copy(&hook_path, &backup_path)?;
        backup = Some(backup_path);
    }

    // Write to temp file first, then rename (atomic)
    let temp_path = hooks_dir.join(".prepare-commit-msg.tmp");
    fs::write(&temp_path, HOOK_SCRIPT)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&temp_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&temp_path, perms)?;
    }

    fs::rename(&temp_path, &hook_path)?;

    Ok(InstallOutcome::Installed { backup })
}

pub fn uninstall(hooks_dir: &Path) -> Result<UninstallOutcome> {
    let hook_path = hook_path(hooks_dir);
    let backup_path = hooks_dir.join(BACKUP_NAME);

    if !hook_path.exists() {
        return Ok(UninstallOutcome::NotFound);
    }

    if !is_ours(&hook_path) {
        return Err(Error::Git(format!(
            "Hook at {} was not installed by commitgen. Remove manually if intended.",
            hook_path.display()
        )));
    }

    fs::remove_file(&hook_path)?;

    let restored_backup = backup_path.exists();
    if restored_backup {
        fs::rename(&backup_path, &hook_path)?;
    }

    Ok(UninstallOutcome::Removed { restored_backup })
}

pub fn status(hooks_dir: &Path) -> HookStatus {
    let hook_path = hook_path(hooks_dir);
    if !hook_path.exists() {
        HookStatus::Missing
    } else if is_ours(&hook_path) {
        HookStatus::Installed
    } else {
        HookStatus::Foreign
    }
}
