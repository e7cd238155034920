// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ProviderKind;
use crate::domain::Locale;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("{}", .locale.messages().missing_credential)]
    #[diagnostic(
        code(commitgen::credential::missing),
        help("Set COMMITGEN_API_KEY or store one with: commitgen set-key")
    )]
    MissingCredential { locale: Locale },

    #[error("Not a git repository")]
    #[diagnostic(
        code(commitgen::git::not_repo),
        help("Run this command inside a git repository, or pass -C <dir>")
    )]
    NotAGitRepo,

    #[error("Failed to run git: {0}")]
    #[diagnostic(
        code(commitgen::git::unavailable),
        help("Make sure git is installed and on your PATH")
    )]
    GitUnavailable(#[source] std::io::Error),

    #[error("Git error: {0}")]
    #[diagnostic(code(commitgen::git::error))]
    Git(String),

    #[error("{provider} API request failed: {status} {status_text} - {body}")]
    #[diagnostic(code(commitgen::provider::http))]
    Http {
        provider: ProviderKind,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Request to {provider} failed: {message}")]
    #[diagnostic(code(commitgen::provider::transport))]
    Transport {
        provider: ProviderKind,
        message: String,
    },

    #[error("{}{cause}", .locale.messages().generation_failed)]
    #[diagnostic(code(commitgen::generate::failed))]
    Generation { locale: Locale, cause: Box<Error> },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(commitgen::config::error))]
    Config(String),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Clipboard error: {0}")]
    #[diagnostic(code(commitgen::clipboard::error))]
    Clipboard(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(commitgen::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl Error {
    /// True when the provider rejected the credential (HTTP 401), even
    /// when wrapped in a localized generation failure.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Http { status, .. } => *status == 401,
            Error::Generation { cause, .. } => cause.is_unauthorized(),
            _ => false,
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
