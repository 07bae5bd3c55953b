// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Back-traversable history of visited notes.

use std::collections::VecDeque;

use crate::model::NoteId;

pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Visited notes, most recent last. The last entry is the active note.
///
/// There is no forward history: `back` discards the popped entry. The stack holds at most
/// `limit` entries and forgets the oldest ones first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: VecDeque<NoteId>,
    limit: usize,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero is treated as one; the active note is always kept.
    pub fn with_limit(limit: usize) -> Self {
        Self { entries: VecDeque::new(), limit: limit.max(1) }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn active(&self) -> Option<&NoteId> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &NoteId> + '_ {
        self.entries.iter()
    }

    /// Starts a fresh traversal rooted at `note_id`.
    pub fn select(&mut self, note_id: NoteId) {
        self.entries.clear();
        self.entries.push_back(note_id);
    }

    /// Pushes `note_id` unless it is already active. Returns whether the stack changed.
    pub fn navigate_to(&mut self, note_id: NoteId) -> bool {
        if self.active() == Some(&note_id) {
            return false;
        }
        self.entries.push_back(note_id);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    /// Pops the active entry if another one remains beneath it.
    pub fn back(&mut self) -> Option<&NoteId> {
        if self.entries.len() > 1 {
            self.entries.pop_back();
            return self.active();
        }
        None
    }

    /// Removes every occurrence of `note_id`. Returns how many entries were dropped.
    pub fn prune(&mut self, note_id: &NoteId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id| id != note_id);
        before - self.entries.len()
    }

    /// Forgets a note: steps back first when it is active, then prunes it everywhere.
    ///
    /// Returns the note that is active afterwards, if any.
    pub fn forget(&mut self, note_id: &NoteId) -> Option<&NoteId> {
        if self.active() == Some(note_id) {
            self.back();
        }
        self.prune(note_id);
        self.active()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
