// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use crate::domain::Locale;

const SYSTEM_PROMPT_EN: &str = r#"Consolidate ALL changes in the git diff into A SINGLE Conventional Commits message.

CORE RULE: no matter how many files changed, output exactly ONE header and ONE body.

Requirements:
- Header: <type>(<scope>): <English summary, max 50 chars, imperative mood, no trailing period>
- Scope: fold every change into one primary scope, or use a generic one such as "project" or "refactor". NEVER output more than one header.
- Body: required. Use "- " bullets grouped by logical purpose (e.g. "Fix build issues", "Improve UI").
- NEVER split the message per file ("feat(A): ... feat(B): ..." is WRONG).
- Ignore whitespace-only changes unless the type is style.
- Output ONLY the commit message: no code fences, no explanation."#;

const SYSTEM_PROMPT_ZH: &str = r#"将 git diff 中的所有修改合并为唯一一条符合 Conventional Commits 规范的提交信息。

核心规则: 无论修改了多少文件，只能输出一个 Header 和一个 Body。

要求:
- Header: <type>(<scope>): <中文描述，50 字以内，祈使语气，结尾无句号>
- Scope: 将所有修改归纳为一个最主要的 scope，或使用 "project"、"refactor" 等通用词。严禁输出多个 Header。
- Body: 必须包含，使用 "- " 列表，按逻辑功能归类（如“修复构建问题”、“优化 UI”）。
- 严禁按文件分段（"feat(A): ... feat(B): ..." 是错误的）。
- 忽略纯空白变动（style 类型除外）。
- 仅输出提交信息，不要代码块，不要解释。"#;

pub fn system_prompt(locale: Locale) -> &'static str {
    match locale {
        Locale::Zh => SYSTEM_PROMPT_ZH,
        Locale::En => SYSTEM_PROMPT_EN,
    }
}

pub fn user_message(diff: &str) -> String {
    format!("Git Diff:\n{diff}")
}
