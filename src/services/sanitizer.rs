// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::LazyLock;

use regex::Regex;

const FENCE: &str = "```";

/// Opening fence with an optional language tag, e.g. "```json\n".
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_]*\r?\n?").unwrap());

static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n?```$").unwrap());

/// Trim a model reply and unwrap it from a markdown code fence.
///
/// Fences are peeled until the text no longer starts with one, so the
/// result is a fixed point: cleaning it again changes nothing.
pub fn clean_response(raw: &str) -> String {
    let mut cleaned = raw.trim().to_string();

    while cleaned.starts_with(FENCE) {
        let without_open = OPENING_FENCE.replace(&cleaned, "");
        let without_close = CLOSING_FENCE.replace(&without_open, "");
        cleaned = without_close.trim().to_string();
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_only_trimmed() {
        assert_eq!(
            clean_response("  feat(cli): add flag\n\n- detail \n"),
            "feat(cli): add flag\n\n- detail"
        );
    }

    #[test]
    fn fence_in_the_middle_is_kept() {
        let raw = "feat: add example\n\n```rust\nfn main() {}\n```";
        assert_eq!(clean_response(raw), raw);
    }

    #[test]
    fn unterminated_fence_drops_opening_only() {
        assert_eq!(clean_response("```text\nfix: typo"), "fix: typo");
    }

    #[test]
    fn nested_fences_are_all_removed() {
        assert_eq!(clean_response("```\n```code```"), "");
    }

    #[test]
    fn crlf_fences_are_removed() {
        assert_eq!(clean_response("```\r\nchore: bump\r\n```"), "chore: bump");
    }
}
