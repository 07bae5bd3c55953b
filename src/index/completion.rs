// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor-side autocomplete helpers.
//!
//! Cursors are byte offsets into the edited text. A cursor past the end is clamped; one that
//! splits a UTF-8 character yields no word.

/// The run of non-whitespace characters ending at `cursor`, with its start offset.
pub fn current_word(text: &str, cursor: usize) -> Option<(usize, &str)> {
    let before = text.get(..cursor.min(text.len()))?;
    let start = before
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0);
    let word = &before[start..];
    if word.is_empty() {
        return None;
    }
    Some((start, word))
}

/// Edited text after accepting a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Cursor placed right after the inserted suggestion.
    pub cursor: usize,
}

/// Replaces the word before `cursor` with `suggestion`. `None` when there is no such word.
pub fn apply_suggestion(text: &str, cursor: usize, suggestion: &str) -> Option<Completion> {
    let cursor = cursor.min(text.len());
    let (start, _) = current_word(text, cursor)?;

    let mut out = String::with_capacity(text.len() + suggestion.len());
    out.push_str(&text[..start]);
    out.push_str(suggestion);
    out.push_str(&text[cursor..]);
    Some(Completion { text: out, cursor: start + suggestion.len() })
}
