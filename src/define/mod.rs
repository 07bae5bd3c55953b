// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Term definitions from an external text-generation service.
//!
//! This is the only asynchronous boundary of the crate. Providers never fail: every error is
//! logged and degraded into a human-readable fallback string. Lookups never touch the vault,
//! and [`LookupSlot`] lets a view drop results that arrive after it moved on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DefineConfig;

pub const MISSING_KEY_MESSAGE: &str =
    "API Key not configured. Please set up your environment variables.";
pub const LOOKUP_FAILED_MESSAGE: &str = "Sorry, I couldn't fetch a definition at this moment.";

#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Returns a short definition of `term` as used in `context`, or a fallback message.
    async fn define(&self, term: &str, context: &str) -> String;
}

/// Fixed answers, for tests and offline use.
#[derive(Debug, Clone)]
pub struct StaticDefiner {
    text: String,
}

impl StaticDefiner {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl DefinitionProvider for StaticDefiner {
    async fn define(&self, term: &str, _context: &str) -> String {
        self.text.replace("{term}", term)
    }
}

#[derive(Debug, Error)]
pub enum DefineError {
    #[error("definition request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("definition service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("definition service returned no text")]
    EmptyResponse,
}

/// Google Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiDefiner {
    client: reqwest::Client,
    config: DefineConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiDefiner {
    pub fn new(config: DefineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "http client setup failed; using defaults");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    pub fn config(&self) -> &DefineConfig {
        &self.config
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<String, DefineError> {
        let url = format!("{}/models/{}:generateContent", self.config.endpoint, self.config.model);
        let body = GenerateRequest { contents: [Content { parts: [Part { text: prompt }] }] };

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DefineError::Status { status, body });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        let text = text.trim();
        if text.is_empty() {
            return Err(DefineError::EmptyResponse);
        }
        Ok(text.to_owned())
    }
}

#[async_trait]
impl DefinitionProvider for GeminiDefiner {
    async fn define(&self, term: &str, context: &str) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!(term, "definition requested without an API key");
            return MISSING_KEY_MESSAGE.to_owned();
        };

        match self.request(api_key, &prompt(term, context)).await {
            Ok(text) => {
                tracing::debug!(term, chars = text.len(), "definition received");
                text
            }
            Err(err) => {
                tracing::warn!(term, error = %err, "definition lookup failed");
                LOOKUP_FAILED_MESSAGE.to_owned()
            }
        }
    }
}

/// Prompt asking for a short, context-aware definition.
pub fn prompt(term: &str, context: &str) -> String {
    format!(
        "Based on the following context, provide a short, one-paragraph definition for the term \
         \"{term}\".\nThe definition should be insightful and relevant to the context provided. \
         Do not just give a generic dictionary definition.\n\nContext:\n---\n{context}\n---\n\n\
         Term: \"{term}\"\n\nShort Definition:"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub term: String,
    pub text: String,
}

/// Tracks the single in-flight lookup of a popup.
///
/// Starting a new lookup supersedes the previous one; results for superseded or cancelled
/// tickets are dropped.
#[derive(Debug, Default)]
pub struct LookupSlot {
    next_ticket: u64,
    pending: Option<(LookupTicket, String)>,
}

impl LookupSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, term: impl Into<String>) -> LookupTicket {
        self.next_ticket += 1;
        let ticket = LookupTicket(self.next_ticket);
        self.pending = Some((ticket, term.into()));
        ticket
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        matches!(&self.pending, Some((current, _)) if *current == ticket)
    }

    /// Accepts a finished lookup if `ticket` is still current.
    pub fn complete(&mut self, ticket: LookupTicket, text: String) -> Option<Definition> {
        if !self.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale definition result");
            return None;
        }
        let (_, term) = self.pending.take()?;
        Some(Definition { term, text })
    }
}
