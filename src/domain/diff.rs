// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

/// The diff that would go into the next commit, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDiff {
    Staged(String),
    /// Nothing was staged, so the working tree diff is used instead.
    Unstaged(String),
    Empty,
}

impl PendingDiff {
    pub fn text(&self) -> &str {
        match self {
            Self::Staged(text) | Self::Unstaged(text) => text,
            Self::Empty => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn scope(&self) -> &'static str {
        match self {
            Self::Staged(_) => "staged",
            Self::Unstaged(_) => "unstaged",
            Self::Empty => "none",
        }
    }
}
