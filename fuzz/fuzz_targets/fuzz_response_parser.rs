// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use commitgen::config::ProviderKind;
use commitgen::services::llm::adapter_for;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        for provider in ProviderKind::ALL {
            let _ = adapter_for(provider).parse_response(body);
        }
    }
});
