// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde::{Deserialize, Serialize};

/// Language used for the prompt and every user-facing string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    #[default]
    En,
}

/// Locale as written in config: `auto` defers to the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LocaleSetting {
    #[default]
    Auto,
    Zh,
    En,
}

/// User-facing strings for one locale.
pub struct Messages {
    pub missing_credential: &'static str,
    pub generation_failed: &'static str,
    pub generating: &'static str,
    pub no_changes: &'static str,
    pub unstaged_fallback: &'static str,
    pub generated: &'static str,
    pub empty_response: &'static str,
    pub no_credential_cancelled: &'static str,
    pub enter_credential: &'static str,
    pub credential_saved: &'static str,
    pub credential_cleared: &'static str,
    pub credential_invalid: &'static str,
    pub reenter_credential: &'static str,
    pub written_to_file: &'static str,
    pub copied: &'static str,
    pub confirm_commit: &'static str,
    pub committed: &'static str,
    pub error_prefix: &'static str,
}

static EN: Messages = Messages {
    missing_credential: "API key is not provided.",
    generation_failed: "Failed to generate commit message: ",
    generating: "Generating commit message...",
    no_changes: "No staged changes detected.",
    unstaged_fallback: "Nothing is staged; using unstaged changes instead.",
    generated: "Generated Message:",
    empty_response: "Failed to extract commit message from API response.",
    no_credential_cancelled: "No API key provided, operation cancelled.",
    enter_credential: "Enter your API key (will be stored securely)",
    credential_saved: "API key saved securely!",
    credential_cleared: "API key cleared!",
    credential_invalid: "API key is invalid or expired",
    reenter_credential: "Re-enter API key?",
    written_to_file: "Commit message written to",
    copied: "Commit message copied to clipboard",
    confirm_commit: "Create commit with this message?",
    committed: "Committed!",
    error_prefix: "Error: ",
};

static ZH: Messages = Messages {
    missing_credential: "未提供 API Key。",
    generation_failed: "生成提交消息失败: ",
    generating: "正在生成提交消息...",
    no_changes: "未检测到暂存区更改。",
    unstaged_fallback: "暂存区为空，改用未暂存的更改。",
    generated: "生成的消息:",
    empty_response: "未能从 API 响应中提取提交消息。",
    no_credential_cancelled: "未提供 API Key，操作已取消。",
    enter_credential: "请输入您的 API Key（将安全存储）",
    credential_saved: "API Key 已安全保存！",
    credential_cleared: "API Key 已清除！",
    credential_invalid: "API Key 无效或已过期",
    reenter_credential: "重新输入 API Key？",
    written_to_file: "提交消息已写入",
    copied: "提交消息已复制到剪贴板",
    confirm_commit: "使用此消息创建提交？",
    committed: "已提交！",
    error_prefix: "错误: ",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Self::Zh => &ZH,
            Self::En => &EN,
        }
    }

    /// Classify a locale tag such as `zh`, `zh-CN` or `zh_TW.UTF-8`.
    /// Anything that is not Chinese falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "zh" || tag.starts_with("zh-") || tag.starts_with("zh_") || tag.starts_with("zh.")
        {
            Self::Zh
        } else {
            Self::En
        }
    }

    /// Detect from the POSIX locale variables, in their precedence order.
    pub fn detect() -> Self {
        Self::detect_with(|name| std::env::var(name).ok())
    }

    pub fn detect_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .map(|value| Self::from_tag(&value))
            .unwrap_or_default()
    }
}

impl LocaleSetting {
    pub fn resolve(self) -> Locale {
        match self {
            Self::Auto => Locale::detect(),
            Self::Zh => Locale::Zh,
            Self::En => Locale::En,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zh => write!(f, "zh"),
            Self::En => write!(f, "en"),
        }
    }
}

impl std::fmt::Display for LocaleSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Zh => write!(f, "zh"),
            Self::En => write!(f, "en"),
        }
    }
}
