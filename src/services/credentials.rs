// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! API keys in the platform keychain, one entry per provider.
//!
//! Without the `secure-storage` feature nothing is ever found and
//! writes report that the build has no keychain support.

use secrecy::SecretString;

use crate::config::ProviderKind;
use crate::error::{Error, Result};

#[cfg(feature = "secure-storage")]
const SERVICE: &str = "commitgen";

#[cfg(feature = "secure-storage")]
pub fn load(provider: ProviderKind) -> Option<SecretString> {
    let entry = match keyring::Entry::new(SERVICE, &provider.to_string()) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!(error = %e, "keychain unavailable");
            return None;
        }
    };

    match entry.get_password() {
        Ok(key) if !key.trim().is_empty() => Some(SecretString::from(key)),
        Ok(_) | Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            tracing::debug!(error = %e, %provider, "could not read key from keychain");
            None
        }
    }
}

#[cfg(feature = "secure-storage")]
pub fn store(provider: ProviderKind, key: &str) -> Result<()> {
    keyring::Entry::new(SERVICE, &provider.to_string())
        .and_then(|entry| entry.set_password(key))
        .map_err(|e| Error::Keyring(e.to_string()))
}

/// Remove the stored key. Returns false when there was nothing to remove.
#[cfg(feature = "secure-storage")]
pub fn clear(provider: ProviderKind) -> Result<bool> {
    let entry = keyring::Entry::new(SERVICE, &provider.to_string())
        .map_err(|e| Error::Keyring(e.to_string()))?;

    match entry.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(Error::Keyring(e.to_string())),
    }
}

#[cfg(not(feature = "secure-storage"))]
pub fn load(_provider: ProviderKind) -> Option<SecretString> {
    None
}

#[cfg(not(feature = "secure-storage"))]
pub fn store(_provider: ProviderKind, _key: &str) -> Result<()> {
    Err(Error::Config(
        "built without keychain support; set COMMITGEN_API_KEY instead".into(),
    ))
}

#[cfg(not(feature = "secure-storage"))]
pub fn clear(_provider: ProviderKind) -> Result<bool> {
    Err(Error::Config(
        "built without keychain support; set COMMITGEN_API_KEY instead".into(),
    ))
}
