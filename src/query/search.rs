// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Title search.
//!
//! [`SearchMode::Substring`] filters the note listing: every note whose lowercase title contains
//! the lowercase needle, in the requested [`SortOrder`]. [`SearchMode::Fuzzy`] returns the same
//! hits first and then appends near misses: titles whose word initials spell the needle, or with
//! a word (or the whole title) close enough to it to be a typo.

use serde::{Deserialize, Serialize};

use super::listing::{sorted_notes, SortOrder};
use crate::model::{term_key, Note, Vault};

/// Lowest similarity, in `0.0..=1.0`, at which a typo still counts as a match.
pub const FUZZY_THRESHOLD: f64 = 0.75;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchMode {
    #[default]
    Substring,
    Fuzzy,
}

/// Searches note titles. An empty needle lists every note in `order`.
pub fn search_notes<'a>(
    vault: &'a Vault,
    needle: &str,
    mode: SearchMode,
    order: SortOrder,
) -> Vec<&'a Note> {
    let needle = term_key(needle.trim());
    let listing = sorted_notes(vault, order);
    if needle.is_empty() {
        return listing;
    }

    let (mut hits, rest): (Vec<_>, Vec<_>) =
        listing.into_iter().partition(|note| term_key(note.title()).contains(&needle));
    if mode == SearchMode::Substring {
        return hits;
    }

    let mut near = rest
        .into_iter()
        .filter_map(|note| title_similarity(&needle, &term_key(note.title())).map(|s| (s, note)))
        .collect::<Vec<_>>();
    // Stable: equal similarity keeps the listing order.
    near.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    hits.extend(near.into_iter().map(|(_, note)| note));
    hits
}

/// How closely a lowercase `title` matches a lowercase `needle` it does not contain.
fn title_similarity(needle: &str, title: &str) -> Option<f64> {
    if spells_initials(needle, title) {
        return Some(1.0);
    }

    let whole = rapidfuzz::fuzz::ratio(needle.chars(), title.chars());
    let best = title
        .split_whitespace()
        .map(|word| rapidfuzz::fuzz::ratio(needle.chars(), word.chars()))
        .fold(whole, f64::max);
    (best >= FUZZY_THRESHOLD).then_some(best)
}

/// `vbw` spells "Virtual Brain Wiki"; so does the prefix `vb`. Single letters never do.
fn spells_initials(needle: &str, title: &str) -> bool {
    let needle = needle.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>();
    if needle.len() < 2 {
        return false;
    }
    let initials = title.split_whitespace().filter_map(|word| word.chars().next());
    let mut wanted = needle.iter();
    initials.zip(wanted.by_ref()).all(|(initial, want)| initial == *want) && wanted.next().is_none()
}
