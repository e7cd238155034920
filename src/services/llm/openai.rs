// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ChatAdapter, WireRequest, secret_header};
use crate::error::Result;

const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// `Authorization: Bearer <key>` (OpenAI and compatible servers)
    Bearer,
    /// `api-key: <key>` (Azure OpenAI)
    ApiKeyHeader,
}

/// OpenAI chat completions and the APIs that copy its shape.
pub struct OpenAiAdapter {
    auth: Auth,
}

impl OpenAiAdapter {
    pub const BEARER: Self = Self { auth: Auth::Bearer };
    pub const AZURE: Self = Self {
        auth: Auth::ApiKeyHeader,
    };
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatAdapter for OpenAiAdapter {
    fn build_request(
        &self,
        system: &str,
        user: &str,
        model: &str,
        api_key: &SecretString,
    ) -> Result<WireRequest> {
        let mut headers = HeaderMap::new();
        match self.auth {
            Auth::Bearer => secret_header(
                &mut headers,
                "authorization",
                &format!("Bearer {}", api_key.expose_secret()),
            )?,
            Auth::ApiKeyHeader => secret_header(&mut headers, "api-key", api_key.expose_secret())?,
        }

        let body = serde_json::to_value(ChatRequest {
            model,
            messages: [
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
        })?;

        Ok(WireRequest { headers, body })
    }

    fn parse_response(&self, body: &str) -> String {
        serde_json::from_str::<ChatResponse>(body)
            .ok()
            .and_then(|resp| resp.choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        match self.auth {
            Auth::Bearer => "openai",
            Auth::ApiKeyHeader => "azure",
        }
    }
}
