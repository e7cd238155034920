// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::PathBuf;

use clap::Parser;

use crate::domain::LocaleSetting;

#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(version)]
#[command(about = "Generate a Conventional Commits message from your git diff", long_about = None)]
pub struct Cli {
    /// API provider (openai, claude, azure, custom)
    #[arg(short, long, env = "COMMITGEN_PROVIDER")]
    pub provider: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "COMMITGEN_MODEL")]
    pub model: Option<String>,

    /// API endpoint URL
    #[arg(long, env = "COMMITGEN_API_URL")]
    pub api_url: Option<String>,

    /// Language of the prompt and messages
    #[arg(long, value_enum)]
    pub locale: Option<LocaleSetting>,

    /// Repository working directory (default: current directory)
    #[arg(short = 'C', long = "cwd", value_name = "DIR", global = true)]
    pub cwd: Option<PathBuf>,

    /// Create the commit after generating the message
    #[arg(long)]
    pub commit: bool,

    /// Auto-confirm without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Copy the generated message to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write the generated message into this commit message file
    #[arg(long, value_name = "FILE")]
    pub message_file: Option<PathBuf>,

    /// Show the prompt sent to the API
    #[arg(long)]
    pub show_prompt: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Store an API key in the system keychain
    SetKey {
        /// Provider to store the key for (default: configured provider)
        provider: Option<String>,
    },
    /// Remove a stored API key from the system keychain
    ClearKey {
        /// Provider to clear the key for (default: configured provider)
        provider: Option<String>,
    },
    /// Manage the prepare-commit-msg git hook
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum HookAction {
    /// Install the prepare-commit-msg hook
    Install,
    /// Remove the hook (restores any backed-up hook)
    Uninstall,
    /// Show whether the hook is installed
    Status,
}
