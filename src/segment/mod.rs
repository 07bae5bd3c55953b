// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Splits note bodies into plain text and cross-reference segments.
//!
//! Scanning uses the [`TermIndex`] alternation, which lists terms longest first; with
//! leftmost-first matching this makes "Getting Started Guide" win over "Getting Started".
//! Segment text is always the exact source slice, so concatenating the output reproduces the
//! input byte-for-byte.

use crate::index::{TermIndex, TermTarget};
use crate::model::{FolderId, NoteId};

/// Characters stripped from the edges of a clicked word before lookup.
pub const WORD_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    NoteRef { text: String, note_id: NoteId },
    FolderRef { text: String, folder_id: FolderId },
}

impl Segment {
    /// The source text this segment covers, with its original casing.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::NoteRef { text, .. } | Self::FolderRef { text, .. } => text,
        }
    }

    pub fn is_link(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

/// Segments `text` against `index`.
///
/// A match that resolves to `self_id` (the note being rendered) stays plain text; it does not
/// fall back to a folder of the same name. Neighbouring plain text is merged into one run, so
/// links and text always alternate.
pub fn segment(text: &str, index: &TermIndex, self_id: Option<&NoteId>) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    let Some(pattern) = index.pattern() else {
        return vec![Segment::Text(text.to_owned())];
    };

    let mut out = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        push_text(&mut out, &text[cursor..found.start()]);
        match classify(found.as_str(), index, self_id) {
            Some(link) => out.push(link),
            None => push_text(&mut out, found.as_str()),
        }
        cursor = found.end();
    }
    push_text(&mut out, &text[cursor..]);
    out
}

fn push_text(out: &mut Vec<Segment>, piece: &str) {
    if piece.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Segment::Text(run)) => run.push_str(piece),
        _ => out.push(Segment::Text(piece.to_owned())),
    }
}

/// Link for a matched piece, or `None` when it must stay plain text.
fn classify(piece: &str, index: &TermIndex, self_id: Option<&NoteId>) -> Option<Segment> {
    if let Some(note_id) = index.note_for(piece) {
        if Some(note_id) == self_id {
            return None;
        }
        return Some(Segment::NoteRef { text: piece.to_owned(), note_id: note_id.clone() });
    }
    // Regex case folding can match spellings that `to_lowercase` maps elsewhere.
    let folder_id = index.folder_for(piece)?;
    Some(Segment::FolderRef { text: piece.to_owned(), folder_id: folder_id.clone() })
}

/// Concatenates segment texts; the inverse of [`segment`].
pub fn join(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// What clicking a single word in plain-text contexts leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordTarget {
    Note(NoteId),
    Folder(FolderId),
    /// Not a known term; hand it to the definition lookup.
    Define(String),
}

/// Trims [`WORD_PUNCTUATION`] from both ends of `word`.
pub fn strip_word_punctuation(word: &str) -> &str {
    word.trim_matches(WORD_PUNCTUATION)
}

/// Whitespace-separated clickable words of `text`, in order.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Resolves a clicked word. `None` when nothing is left after stripping punctuation.
pub fn resolve_word(word: &str, index: &TermIndex) -> Option<WordTarget> {
    let stripped = strip_word_punctuation(word.trim());
    if stripped.is_empty() {
        return None;
    }
    Some(match index.resolve(stripped) {
        Some(TermTarget::Note(note_id)) => WordTarget::Note(note_id),
        Some(TermTarget::Folder(folder_id)) => WordTarget::Folder(folder_id),
        None => WordTarget::Define(stripped.to_owned()),
    })
}
