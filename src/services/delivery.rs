// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Marker git writes above the diff appended by `git commit -v`.
const SCISSORS: &str = ">8";

/// Byte offset of the scissors line, if any.
fn scissors_offset(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with('#') && line.contains(SCISSORS) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Put `message` at the top of a commit message file, replacing any text
/// already there but keeping git's `#` comment lines below it. Everything
/// from the scissors line on is kept verbatim.
pub fn write_message_file(path: &Path, message: &str) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let (head, tail) = existing.split_at(scissors_offset(&existing).unwrap_or(existing.len()));
    let comments: Vec<&str> = head.lines().filter(|line| line.starts_with('#')).collect();

    let mut content = String::with_capacity(message.len() + existing.len() + 2);
    content.push_str(message.trim_end());
    content.push('\n');
    if !comments.is_empty() || !tail.is_empty() {
        content.push('\n');
    }
    if !comments.is_empty() {
        content.push_str(&comments.join("\n"));
        content.push('\n');
    }
    content.push_str(tail);

    fs::write(path, content)?;
    Ok(())
}

pub fn copy_to_clipboard(message: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard
        .set_text(message.to_owned())
        .map_err(|e| Error::Clipboard(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_git_comments_and_drops_old_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(
            &path,
            "old draft\n# Please enter the commit message\n# On branch main\n",
        )
        .unwrap();

        write_message_file(&path, "feat: add thing\n\n- detail\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "feat: add thing\n\n- detail\n\n# Please enter the commit message\n# On branch main\n"
        );
    }

    #[test]
    fn keeps_verbose_diff_below_scissors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        let tail = "# ------------------------ >8 ------------------------\n\
                    # Do not modify or remove the line above.\n\
                    diff --git a/x b/x\n\
                    +added\n";
        fs::write(&path, format!("\n# On branch main\n{tail}")).unwrap();

        write_message_file(&path, "feat: add x").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("feat: add x\n\n# On branch main\n{tail}")
        );
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MSG");

        write_message_file(&path, "fix: typo").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fix: typo\n");
    }
}
