// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::Cli;
use crate::domain::LocaleSetting;
use crate::error::{Error, Result};

/// Which vendor API the endpoint speaks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    #[serde(alias = "anthropic")]
    Claude,
    Azure,
    Custom,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::OpenAI, Self::Claude, Self::Azure, Self::Custom];

    pub fn default_api_url(self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com/v1/chat/completions",
            Self::Claude => "https://api.anthropic.com/v1/messages",
            Self::Azure => {
                "https://{resource-name}.openai.azure.com/openai/deployments/{deployment-id}/chat/completions"
            }
            Self::Custom => "",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAI | Self::Azure => "gpt-3.5-turbo",
            Self::Claude => "claude-3-5-sonnet-20241022",
            Self::Custom => "",
        }
    }

    /// Vendor-specific environment variable consulted when no key is configured.
    pub fn key_env_var(self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Claude => Some("ANTHROPIC_API_KEY"),
            Self::Azure => Some("AZURE_OPENAI_API_KEY"),
            Self::Custom => None,
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "claude" | "anthropic" => Ok(Self::Claude),
            "azure" => Ok(Self::Azure),
            "custom" => Ok(Self::Custom),
            other => Err(Error::Config(format!(
                "unknown provider '{other}'. Expected one of: openai, claude, azure, custom"
            ))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Claude => write!(f, "claude"),
            Self::Azure => write!(f, "azure"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Everything one generation request needs, fully resolved.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub api_url: String,
    pub model: String,
    pub api_key: SecretString,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Endpoint URL; falls back to the provider's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Model identifier; falls back to the provider's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Prompt and message language (auto, zh, en)
    #[serde(default)]
    pub locale: LocaleSetting,

    /// Request timeout in seconds (default 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings a repository may pin in its `.commitgen.toml`.
///
/// Endpoint, provider and key are user-level only: a cloned repository must
/// not be able to send the user's credential to a host of its choosing.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<LocaleSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

const USER_ONLY_KEYS: [&str; 3] = ["provider", "api_url", "api_key"];

impl ProjectConfig {
    fn load(path: &Path) -> Result<Self> {
        let figment = Figment::from(Toml::file(path));
        for key in USER_ONLY_KEYS {
            if figment.contains(key) {
                warn!(
                    key,
                    path = %path.display(),
                    "ignoring user-only setting in project config"
                );
            }
        }
        figment
            .extract()
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_url: None,
            model: None,
            api_key: None,
            locale: LocaleSetting::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli, work_dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.commitgen.toml in the working directory)
        let project_config = work_dir.join(".commitgen.toml");
        if project_config.exists() {
            let project = ProjectConfig::load(&project_config)?;
            figment = figment.merge(Serialized::defaults(project));
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // COMMITGEN_PROVIDER, COMMITGEN_API_URL, COMMITGEN_API_KEY, ...
        figment = figment.merge(Env::prefixed("COMMITGEN_"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli)?;

        if config.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            config.api_key = config
                .provider
                .key_env_var()
                .and_then(|var| std::env::var(var).ok())
                .filter(|k| !k.trim().is_empty());
        }

        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "commitgen").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(ref p) = cli.provider {
            self.provider = p.parse()?;
        }
        if let Some(ref m) = cli.model {
            self.model = Some(m.clone());
        }
        if let Some(ref u) = cli.api_url {
            self.api_url = Some(u.clone());
        }
        if let Some(locale) = cli.locale {
            self.locale = locale;
        }
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_url())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Combine with a credential into the shape the generator consumes.
    pub fn provider_config(&self, api_key: SecretString) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider,
            api_url: self.api_url().to_string(),
            model: self.model().to_string(),
            api_key,
        }
    }

    /// Check that the endpoint and model are usable before contacting anything.
    pub fn validate(&self) -> Result<()> {
        let api_url = self.api_url().trim();
        if api_url.is_empty() {
            return Err(Error::Config(format!(
                "{} needs an api_url. Set it in config (commitgen init) or pass --api-url",
                self.provider
            )));
        }

        if api_url.contains('{') || api_url.contains('}') {
            return Err(Error::Config(format!(
                "api_url still contains placeholders: '{api_url}'. Replace {{resource-name}} and {{deployment-id}} with your Azure values"
            )));
        }

        let parsed = url::Url::parse(api_url)
            .map_err(|e| Error::Config(format!("api_url '{api_url}' is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "api_url must start with http:// or https://, got '{api_url}'"
            )));
        }

        if self.model().trim().is_empty() {
            return Err(Error::Config(format!(
                "{} needs a model. Set it in config (commitgen init) or pass --model",
                self.provider
            )));
        }

        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# commitgen configuration

# API provider: openai, claude, azure, custom
provider = "openai"

# Endpoint URL (defaults per provider)
#   openai: https://api.openai.com/v1/chat/completions
#   claude: https://api.anthropic.com/v1/messages
#   azure:  https://{resource-name}.openai.azure.com/openai/deployments/{deployment-id}/chat/completions
# api_url = "https://api.openai.com/v1/chat/completions"

# Model identifier (openai/azure: gpt-3.5-turbo, claude: claude-3-5-sonnet-20241022)
# model = "gpt-3.5-turbo"

# Language of the prompt and messages: auto, zh, en
locale = "auto"

# Request timeout in seconds
timeout_secs = 120

# Prefer `commitgen set-key` or COMMITGEN_API_KEY over storing the key here.
# api_key = ""
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
