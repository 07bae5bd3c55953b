// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration, read from the environment.

use std::time::Duration;

use crate::nav::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 7;
pub const DEFAULT_DEFINE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_DEFINE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DEFINE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiConfig {
    pub history_limit: usize,
    pub suggestion_limit: usize,
    pub define: DefineConfig,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            define: DefineConfig::default(),
        }
    }
}

impl WikiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source; unparsable values fall back to
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            history_limit: parse_or(&lookup, "BRAINWIKI_HISTORY_LIMIT", defaults.history_limit),
            suggestion_limit: parse_or(
                &lookup,
                "BRAINWIKI_SUGGESTION_LIMIT",
                defaults.suggestion_limit,
            ),
            define: DefineConfig::from_lookup(&lookup),
        }
    }
}

/// Settings for the hosted definition lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for DefineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_DEFINE_MODEL.to_owned(),
            endpoint: DEFAULT_DEFINE_ENDPOINT.to_owned(),
            timeout: DEFAULT_DEFINE_TIMEOUT,
        }
    }
}

impl DefineConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        let model = lookup("BRAINWIKI_DEFINE_MODEL")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.model);
        let endpoint = lookup("BRAINWIKI_DEFINE_ENDPOINT")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.endpoint);
        let timeout = Duration::from_secs(parse_or(
            &lookup,
            "BRAINWIKI_DEFINE_TIMEOUT_SECS",
            defaults.timeout.as_secs(),
        ));

        Self { api_key, model, endpoint, timeout }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    lookup(name).and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}
