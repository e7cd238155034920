// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Integration tests for the message generator against mocked vendor APIs.
//!
//! Uses `wiremock` to mock HTTP endpoints so no real LLM servers are needed.

use std::time::Duration;

use secrecy::SecretString;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commitgen::config::{ProviderConfig, ProviderKind};
use commitgen::domain::Locale;
use commitgen::error::Error;
use commitgen::services::llm::MessageGenerator;

const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+pub fn hello() {}\n";

// ─── Test helpers ────────────────────────────────────────────────────────────

fn provider_config(provider: ProviderKind, url: String, key: &str) -> ProviderConfig {
    ProviderConfig {
        provider,
        api_url: url,
        model: "test-model".into(),
        api_key: SecretString::from(key.to_string()),
    }
}

fn generator() -> MessageGenerator {
    MessageGenerator::new(Duration::from_secs(5))
}

fn openai_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn anthropic_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_1",
        "type": "message",
        "content": [{"type": "text", "text": text}]
    })
}

// ─── OpenAI ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn openai_generates_cleaned_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "messages": [{"role": "system"}, {"role": "user", "content": format!("Git Diff:\n{DIFF}")}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(openai_reply("```json\nfeat: x\n```")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = provider_config(
        ProviderKind::OpenAI,
        format!("{}/v1/chat/completions", server.uri()),
        "test-key",
    );
    let message = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap();

    assert_eq!(message, "feat: x");
}

#[tokio::test]
async fn azure_sends_api_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt/chat/completions"))
        .and(header("api-key", "azure-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(
            "  fix(api): handle timeout\n\n- retry once  ",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let config = provider_config(
        ProviderKind::Azure,
        format!("{}/openai/deployments/gpt/chat/completions", server.uri()),
        "azure-key",
    );
    let message = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap();

    assert_eq!(message, "fix(api): handle timeout\n\n- retry once");
}

// ─── Anthropic ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn anthropic_generates_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "max_tokens": 1024,
            "messages": [{"role": "user", "content": format!("Git Diff:\n{DIFF}")}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_reply(
            "```\nfeat(lib): add hello function\n\n- expose greeting helper\n```",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let config = provider_config(
        ProviderKind::Claude,
        format!("{}/v1/messages", server.uri()),
        "test-key",
    );
    let message = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap();

    assert_eq!(
        message,
        "feat(lib): add hello function\n\n- expose greeting helper"
    );
}

#[tokio::test]
async fn chinese_locale_sends_chinese_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(serde_json::json!({
            "system": commitgen::services::prompt::system_prompt(Locale::Zh)
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_reply("feat: 添加功能")))
        .expect(1)
        .mount(&server)
        .await;

    let config = provider_config(
        ProviderKind::Claude,
        format!("{}/v1/messages", server.uri()),
        "test-key",
    );
    let message = generator()
        .generate(DIFF, Locale::Zh, &config)
        .await
        .unwrap();

    assert_eq!(message, "feat: 添加功能");
}

// ─── Empty and malformed responses ───────────────────────────────────────────

#[tokio::test]
async fn unparseable_body_yields_empty_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let config = provider_config(ProviderKind::OpenAI, server.uri(), "test-key");
    let message = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap();

    assert_eq!(message, "");
}

#[tokio::test]
async fn empty_content_list_yields_empty_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": []})),
        )
        .mount(&server)
        .await;

    let config = provider_config(ProviderKind::Claude, server.uri(), "test-key");
    let message = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap();

    assert_eq!(message, "");
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply("feat: x")))
        .expect(0)
        .mount(&server)
        .await;

    for (locale, expected) in [
        (Locale::En, "API key is not provided."),
        (Locale::Zh, "未提供 API Key。"),
    ] {
        let config = provider_config(ProviderKind::OpenAI, server.uri(), "  ");
        let err = generator()
            .generate(DIFF, locale, &config)
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::MissingCredential { .. }),
            "expected MissingCredential, got: {err:?}"
        );
        assert_eq!(err.to_string(), expected);
    }
}

#[tokio::test]
async fn unauthorized_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": {"message": "invalid API key"}})),
        )
        .mount(&server)
        .await;

    let config = provider_config(ProviderKind::OpenAI, server.uri(), "bad-key");
    let err = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    let message = err.to_string();
    assert!(
        message.starts_with("Failed to generate commit message: "),
        "got: {message}"
    );
    assert!(message.contains("401"), "got: {message}");
    assert!(message.contains("Unauthorized"), "got: {message}");
    assert!(message.contains("invalid API key"), "got: {message}");
}

#[tokio::test]
async fn server_error_is_wrapped_with_localized_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let config = provider_config(ProviderKind::Claude, server.uri(), "test-key");
    let err = generator()
        .generate(DIFF, Locale::Zh, &config)
        .await
        .unwrap_err();

    assert!(!err.is_unauthorized());
    match err {
        Error::Generation { locale, ref cause } => {
            assert_eq!(locale, Locale::Zh);
            match cause.as_ref() {
                Error::Http {
                    provider, status, ..
                } => {
                    assert_eq!(*provider, ProviderKind::Claude);
                    assert_eq!(*status, 500);
                }
                other => panic!("expected Http cause, got: {other:?}"),
            }
        }
        ref other => panic!("expected Generation error, got: {other:?}"),
    }
    assert!(err.to_string().starts_with("生成提交消息失败: "));
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Use a port that is almost certainly not listening
    let config = provider_config(ProviderKind::OpenAI, "http://127.0.0.1:1".into(), "k");
    let err = generator()
        .generate(DIFF, Locale::En, &config)
        .await
        .unwrap_err();

    match err {
        Error::Generation { ref cause, .. } => assert!(
            matches!(cause.as_ref(), Error::Transport { .. }),
            "expected Transport cause, got: {cause:?}"
        ),
        other => panic!("expected Generation error, got: {other:?}"),
    }
}
