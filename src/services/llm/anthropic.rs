// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ChatAdapter, WireRequest, secret_header};
use crate::error::Result;

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Anthropic Messages API (`/v1/messages`).
pub struct AnthropicAdapter;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl ChatAdapter for AnthropicAdapter {
    fn build_request(
        &self,
        system: &str,
        user: &str,
        model: &str,
        api_key: &SecretString,
    ) -> Result<WireRequest> {
        let mut headers = HeaderMap::new();
        secret_header(&mut headers, "x-api-key", api_key.expose_secret())?;
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let body = serde_json::to_value(MessagesRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: user,
            }],
        })?;

        Ok(WireRequest { headers, body })
    }

    fn parse_response(&self, body: &str) -> String {
        serde_json::from_str::<MessagesResponse>(body)
            .ok()
            .and_then(|resp| resp.content.into_iter().find_map(|block| block.text))
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
