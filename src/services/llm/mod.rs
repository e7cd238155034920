// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

pub mod anthropic;
pub mod openai;

use crate::config::{ProviderConfig, ProviderKind};
use crate::domain::Locale;
use crate::error::{Error, Result};
use crate::services::{prompt, sanitizer};

use anthropic::AnthropicAdapter;
use openai::OpenAiAdapter;

/// A provider-specific request, ready to POST as JSON.
#[derive(Debug)]
pub struct WireRequest {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Maps the one logical chat request onto a vendor wire format and back.
pub trait ChatAdapter: Send + Sync {
    fn build_request(
        &self,
        system: &str,
        user: &str,
        model: &str,
        api_key: &SecretString,
    ) -> Result<WireRequest>;

    /// Extract the reply text. Bodies that don't match the expected
    /// shape yield an empty string rather than an error.
    fn parse_response(&self, body: &str) -> String;

    fn name(&self) -> &str;
}

pub fn adapter_for(provider: ProviderKind) -> &'static dyn ChatAdapter {
    match provider {
        ProviderKind::Claude => &AnthropicAdapter,
        ProviderKind::OpenAI | ProviderKind::Custom => &OpenAiAdapter::BEARER,
        ProviderKind::Azure => &OpenAiAdapter::AZURE,
    }
}

/// Header carrying a credential; marked sensitive so it never shows up in debug output.
pub(crate) fn secret_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
) -> Result<()> {
    let mut value = HeaderValue::from_str(value).map_err(|_| {
        Error::Config("API key contains characters that are not allowed in an HTTP header".into())
    })?;
    value.set_sensitive(true);
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

pub struct MessageGenerator {
    client: Client,
}

impl MessageGenerator {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Turn a diff into a cleaned commit message with a single API call.
    ///
    /// A missing credential fails before anything is sent. Every later
    /// failure is wrapped in [`Error::Generation`] with a localized prefix.
    pub async fn generate(
        &self,
        diff: &str,
        locale: Locale,
        config: &ProviderConfig,
    ) -> Result<String> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(Error::MissingCredential { locale });
        }

        self.request(diff, locale, config)
            .await
            .map_err(|cause| Error::Generation {
                locale,
                cause: Box::new(cause),
            })
    }

    async fn request(&self, diff: &str, locale: Locale, config: &ProviderConfig) -> Result<String> {
        let adapter = adapter_for(config.provider);
        let wire = adapter.build_request(
            prompt::system_prompt(locale),
            &prompt::user_message(diff),
            &config.model,
            &config.api_key,
        )?;

        debug!(
            adapter = adapter.name(),
            url = %config.api_url,
            model = %config.model,
            "sending request"
        );

        let transport = |e: reqwest::Error| Error::Transport {
            provider: config.provider,
            message: if e.is_timeout() {
                "request timed out".into()
            } else {
                e.to_string()
            },
        };

        let response = self
            .client
            .post(&config.api_url)
            .headers(wire.headers)
            .json(&wire.body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                provider: config.provider,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let body = response.text().await.map_err(transport)?;
        let message = sanitizer::clean_response(&adapter.parse_response(&body));

        if message.is_empty() {
            warn!(body_len = body.len(), "no message text in response");
        }

        Ok(message)
    }
}
