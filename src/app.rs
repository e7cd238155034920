// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Password};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands, HookAction};
use crate::config::{Config, ProviderKind};
use crate::domain::{Locale, PendingDiff};
use crate::error::{Error, Result};
use crate::services::{
    credentials, delivery,
    git::GitService,
    hook::{self, HookStatus, InstallOutcome, UninstallOutcome},
    llm::MessageGenerator,
    prompt,
};

pub struct App {
    cli: Cli,
    config: Config,
    locale: Locale,
    work_dir: PathBuf,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let work_dir = match cli.cwd {
            Some(ref dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let config = Config::load(&cli, &work_dir)?;
        let locale = config.locale.resolve();
        debug!(
            provider = %config.provider,
            model = %config.model(),
            api_url = %config.api_url(),
            %locale,
            "config loaded"
        );
        Ok(Self {
            cli,
            config,
            locale,
            work_dir,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd).await;
        }

        self.generate_commit().await
    }

    async fn generate_commit(&mut self) -> Result<()> {
        self.config.validate()?;
        let msgs = self.locale.messages();
        let git = GitService::new(&self.work_dir);

        let Some(api_key) = self.resolve_api_key()? else {
            self.print_info(msgs.no_credential_cancelled);
            return Ok(());
        };

        let outcome = match self.generate_message(&git, api_key).await {
            Err(e) if e.is_unauthorized() && self.is_interactive() => {
                eprintln!("{} {}", style(msgs.error_prefix).red().bold(), e);
                match self.offer_key_reentry()? {
                    Some(new_key) => self.generate_message(&git, new_key).await?,
                    None => return Err(e),
                }
            }
            other => other?,
        };

        let Some(message) = outcome else {
            return Ok(());
        };

        if message.is_empty() {
            self.print_warning(msgs.empty_response);
            return Ok(());
        }

        self.deliver(&git, &message).await
    }

    /// Fetch the diff and ask the provider for a message.
    /// `None` means there was nothing to describe.
    async fn generate_message(
        &self,
        git: &GitService,
        api_key: SecretString,
    ) -> Result<Option<String>> {
        let msgs = self.locale.messages();
        let spinner = self.spinner(msgs.generating);

        let diff = git.pending_diff().await;
        let diff = match diff {
            Ok(diff) => diff,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        };
        debug!(scope = diff.scope(), bytes = diff.text().len(), "diff fetched");

        if diff.is_empty() {
            spinner.finish_and_clear();
            self.print_info(msgs.no_changes);
            return Ok(None);
        }
        if let PendingDiff::Unstaged(_) = diff {
            spinner.suspend(|| self.print_warning(msgs.unstaged_fallback));
        }

        if self.cli.show_prompt {
            spinner.suspend(|| {
                eprintln!("{}", style("--- SYSTEM ---").dim());
                eprintln!("{}", prompt::system_prompt(self.locale));
                eprintln!("{}", style("--- USER ---").dim());
                eprintln!("{}", prompt::user_message(diff.text()));
                eprintln!("{}", style("--- END PROMPT ---").dim());
            });
        }

        let generator = MessageGenerator::new(Duration::from_secs(self.config.timeout_secs));
        let provider_config = self.config.provider_config(api_key);
        let result = generator
            .generate(diff.text(), self.locale, &provider_config)
            .await;
        spinner.finish_and_clear();

        result.map(Some)
    }

    async fn deliver(&self, git: &GitService, message: &str) -> Result<()> {
        let msgs = self.locale.messages();
        let quiet_stdout = self.cli.message_file.is_some() || self.cli.copy || self.cli.commit;

        eprintln!("{}", style(msgs.generated).bold());
        if quiet_stdout {
            eprintln!("{}", style(message).green());
        } else {
            println!("{message}");
            return Ok(());
        }

        if let Some(ref path) = self.cli.message_file {
            delivery::write_message_file(path, message)?;
            self.print_success(&format!("{} {}", msgs.written_to_file, path.display()));
        }

        if self.cli.copy {
            delivery::copy_to_clipboard(message)?;
            self.print_success(msgs.copied);
        }

        if self.cli.commit {
            if !self.cli.yes {
                if !self.is_interactive() {
                    self.print_warning("Not a terminal. Use --yes to commit from scripts/hooks.");
                    return Ok(());
                }
                let confirm = Confirm::new()
                    .with_prompt(msgs.confirm_commit)
                    .default(true)
                    .interact()?;
                if !confirm {
                    return Err(Error::Cancelled);
                }
            }
            git.commit(message).await?;
            self.print_success(msgs.committed);
        }

        Ok(())
    }

    // ─── Credentials ───

    /// Config/env key first, then the keychain, then an interactive prompt.
    ///
    /// Without a terminal an empty key is passed on, so generation reports
    /// the missing credential itself.
    fn resolve_api_key(&self) -> Result<Option<SecretString>> {
        if let Some(key) = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
        {
            return Ok(Some(SecretString::from(key.to_owned())));
        }

        if let Some(key) = credentials::load(self.config.provider) {
            debug!(provider = %self.config.provider, "using key from keychain");
            return Ok(Some(key));
        }

        if !self.is_interactive() {
            return Ok(Some(SecretString::from(String::new())));
        }

        self.prompt_for_key()
    }

    fn prompt_for_key(&self) -> Result<Option<SecretString>> {
        let msgs = self.locale.messages();
        let key = Password::new()
            .with_prompt(msgs.enter_credential)
            .allow_empty_password(true)
            .interact()?;
        let key = key.trim();

        if key.is_empty() {
            return Ok(None);
        }

        match credentials::store(self.config.provider, key) {
            Ok(()) => self.print_success(msgs.credential_saved),
            Err(e) => warn!(error = %e, "could not store API key"),
        }

        Ok(Some(SecretString::from(key.to_owned())))
    }

    /// After a 401: offer to replace the stored key. `None` if declined.
    fn offer_key_reentry(&self) -> Result<Option<SecretString>> {
        let msgs = self.locale.messages();
        let retry = Confirm::new()
            .with_prompt(format!(
                "{}. {}",
                msgs.credential_invalid, msgs.reenter_credential
            ))
            .default(true)
            .interact()?;

        if !retry {
            return Ok(None);
        }

        if let Err(e) = credentials::clear(self.config.provider) {
            warn!(error = %e, "could not clear stored API key");
        }

        self.prompt_for_key()
    }

    /// Whether prompts can be shown. `--yes` only skips the commit confirmation.
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }

    // ─── Subcommands ───

    async fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                println!("Provider: {}", self.config.provider);
                println!("API URL: {}", self.config.api_url());
                println!("Model: {}", self.config.model());
                println!("Locale: {} ({})", self.config.locale, self.locale);
                println!("Timeout: {}s", self.config.timeout_secs);
                let key_state = if self.config.api_key.is_some() {
                    "set (config/env)"
                } else if credentials::load(self.config.provider).is_some() {
                    "set (keychain)"
                } else {
                    "not set"
                };
                println!("API key: {key_state}");
                if let Some(ref path) = Config::config_path() {
                    let status = if path.exists() { "found" } else { "not found" };
                    println!("Config file: {} ({})", path.display(), status);
                }
                Ok(())
            }
            Commands::SetKey { provider } => self.set_api_key(provider.as_deref()),
            Commands::ClearKey { provider } => self.clear_api_key(provider.as_deref()),
            Commands::Hook { action } => self.handle_hook(action).await,
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "commitgen", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    fn target_provider(&self, provider: Option<&str>) -> Result<ProviderKind> {
        match provider {
            Some(p) => p.parse(),
            None => Ok(self.config.provider),
        }
    }

    fn set_api_key(&self, provider: Option<&str>) -> Result<()> {
        let provider = self.target_provider(provider)?;
        let msgs = self.locale.messages();

        eprintln!(
            "Enter API key for {} (input will be hidden):",
            style(provider).bold()
        );

        let key = Password::new().with_prompt("API key").interact()?;

        if key.trim().is_empty() {
            return Err(Error::Config("API key cannot be empty".into()));
        }

        credentials::store(provider, key.trim())?;
        self.print_success(msgs.credential_saved);
        Ok(())
    }

    fn clear_api_key(&self, provider: Option<&str>) -> Result<()> {
        let provider = self.target_provider(provider)?;

        if credentials::clear(provider)? {
            self.print_success(self.locale.messages().credential_cleared);
        } else {
            self.print_info(&format!("No API key stored for {provider}"));
        }
        Ok(())
    }

    // ─── Hook Commands ───

    async fn handle_hook(&self, action: &HookAction) -> Result<()> {
        let git = GitService::new(&self.work_dir);
        let hooks_dir = git.git_dir().await?.join("hooks");
        let hook_path = hook::hook_path(&hooks_dir);

        match action {
            HookAction::Install => match hook::install(&hooks_dir)? {
                InstallOutcome::AlreadyInstalled => {
                    self.print_success(&format!(
                        "Hook already installed at {}",
                        hook_path.display()
                    ));
                }
                InstallOutcome::Installed { backup } => {
                    if let Some(backup) = backup {
                        self.print_info(&format!(
                            "Backed up existing hook to {}",
                            backup.display()
                        ));
                    }
                    self.print_success(&format!("Hook installed at {}", hook_path.display()));
                }
            },
            HookAction::Uninstall => match hook::uninstall(&hooks_dir)? {
                UninstallOutcome::NotFound => {
                    self.print_info(&format!("No hook found at {}", hook_path.display()));
                }
                UninstallOutcome::Removed { restored_backup } => {
                    if restored_backup {
                        self.print_info("Restored previous hook from backup");
                    }
                    self.print_success(&format!("Hook removed from {}", hook_path.display()));
                }
            },
            HookAction::Status => match hook::status(&hooks_dir) {
                HookStatus::Installed => {
                    self.print_success(&format!(
                        "commitgen hook is installed at {}",
                        hook_path.display()
                    ));
                }
                HookStatus::Foreign => {
                    self.print_info(
                        "A prepare-commit-msg hook exists but was not installed by commitgen",
                    );
                }
                HookStatus::Missing => {
                    eprintln!(
                        "{} No prepare-commit-msg hook installed",
                        style("✗").red().bold()
                    );
                    eprintln!(
                        "  Install with: {}",
                        style("commitgen hook install").yellow()
                    );
                }
            },
        }

        Ok(())
    }

    // ─── Output Helpers ───

    fn spinner(&self, msg: &'static str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }

    fn print_success(&self, msg: &str) {
        eprintln!("{} {}", style("✓").green().bold(), msg);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn app(args: &[&str]) -> App {
        App {
            cli: Cli::parse_from(args),
            config: Config::default(),
            locale: Locale::En,
            work_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn yes_does_not_disable_prompts() {
        assert_eq!(
            app(&["commitgen", "--yes"]).is_interactive(),
            app(&["commitgen"]).is_interactive()
        );
    }
}
