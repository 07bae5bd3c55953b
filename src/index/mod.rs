// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Linkable term index derived from a [`Vault`].
//!
//! The index is a pure function of a vault snapshot. It maps lowercase note titles and folder
//! names to their targets and keeps the scanning dictionary (the linkable term list) sorted by
//! term length, longest first, so the segmenter gets longest-match precedence for free.

pub mod completion;

use std::cell::OnceCell;
use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::model::{term_key, FolderId, NoteId, Vault};

pub use completion::{apply_suggestion, current_word, Completion};

// Large vaults produce large alternations; the regex default (10 MiB) is too tight.
const PATTERN_SIZE_LIMIT: usize = 256 * (1 << 20);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermTarget {
    Note(NoteId),
    Folder(FolderId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Note,
    Folder,
}

impl TermTarget {
    pub fn kind(&self) -> TermKind {
        match self {
            Self::Note(_) => TermKind::Note,
            Self::Folder(_) => TermKind::Folder,
        }
    }
}

/// One entry of the scanning dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkableTerm {
    term: String,
    target: TermTarget,
}

impl LinkableTerm {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn target(&self) -> &TermTarget {
        &self.target
    }

    pub fn kind(&self) -> TermKind {
        self.target.kind()
    }
}

#[derive(Debug, Clone)]
pub struct TermIndex {
    rev: u64,
    title_to_note: HashMap<String, NoteId>,
    name_to_folder: HashMap<String, FolderId>,
    terms: Vec<LinkableTerm>,
    pattern: OnceCell<Option<Regex>>,
}

impl TermIndex {
    pub fn build(vault: &Vault) -> Self {
        let mut title_to_note = HashMap::with_capacity(vault.note_count());
        for note in vault.notes() {
            title_to_note.insert(term_key(note.title()), note.id().clone());
        }

        let mut name_to_folder = HashMap::with_capacity(vault.folder_count());
        for folder in vault.folders() {
            name_to_folder.insert(term_key(folder.name()), folder.id().clone());
        }

        let note_terms = vault.notes().map(|note| LinkableTerm {
            term: note.title().to_owned(),
            target: TermTarget::Note(note.id().clone()),
        });
        let folder_terms = vault
            .folders()
            .filter(|folder| !title_to_note.contains_key(&term_key(folder.name())))
            .map(|folder| LinkableTerm {
                term: folder.name().to_owned(),
                target: TermTarget::Folder(folder.id().clone()),
            });

        // Blank titles would link runs of whitespace.
        let mut terms = note_terms
            .chain(folder_terms)
            .filter(|t| !t.term.trim().is_empty())
            .collect::<Vec<_>>();
        // Stable: equal lengths keep notes-before-folders, then insertion order.
        terms.sort_by_key(|t| std::cmp::Reverse(t.term.chars().count()));

        Self { rev: vault.rev(), title_to_note, name_to_folder, terms, pattern: OnceCell::new() }
    }

    /// Vault revision this index was built from.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Linkable terms, longest first.
    pub fn terms(&self) -> &[LinkableTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn note_for(&self, term: &str) -> Option<&NoteId> {
        self.title_to_note.get(&term_key(term))
    }

    /// Folder lookup ignores shadowing; use [`TermIndex::resolve`] for link targets.
    pub fn folder_for(&self, term: &str) -> Option<&FolderId> {
        self.name_to_folder.get(&term_key(term))
    }

    /// Resolves a term to its link target. Notes shadow folders of the same name.
    pub fn resolve(&self, term: &str) -> Option<TermTarget> {
        let key = term_key(term);
        if let Some(note_id) = self.title_to_note.get(&key) {
            return Some(TermTarget::Note(note_id.clone()));
        }
        self.name_to_folder.get(&key).map(|folder_id| TermTarget::Folder(folder_id.clone()))
    }

    /// Autocomplete candidates for a partially typed word.
    ///
    /// Words of one character or less yield nothing. Candidates keep term order (longest
    /// first) and exclude terms the word already spells out completely.
    pub fn suggestions(&self, word: &str, limit: usize) -> Vec<&str> {
        if word.chars().count() <= 1 {
            return Vec::new();
        }
        let prefix = term_key(word);
        self.terms
            .iter()
            .map(|t| t.term.as_str())
            .filter(|term| {
                let key = term_key(term);
                key.starts_with(&prefix) && key != prefix
            })
            .take(limit)
            .collect()
    }

    /// Case-insensitive alternation of every term in list order, compiled on first use.
    ///
    /// `None` when there is nothing to link or the pattern could not be compiled.
    pub(crate) fn pattern(&self) -> Option<&Regex> {
        self.pattern
            .get_or_init(|| {
                if self.terms.is_empty() {
                    return None;
                }
                let alternation = self
                    .terms
                    .iter()
                    .map(|t| regex::escape(&t.term))
                    .collect::<Vec<_>>()
                    .join("|");
                match RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .size_limit(PATTERN_SIZE_LIMIT)
                    .build()
                {
                    Ok(regex) => Some(regex),
                    Err(err) => {
                        tracing::warn!(
                            terms = self.terms.len(),
                            error = %err,
                            "term pattern failed to compile; rendering notes unlinked"
                        );
                        None
                    }
                }
            })
            .as_ref()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{TermIndex, TermKind, TermTarget};
    use crate::model::fixtures::overlapping_terms;
    use crate::model::{demo_snapshot, FolderId, NoteId, Vault};

    fn nid(value: &str) -> NoteId {
        NoteId::new(value).expect("note id")
    }

    fn fid(value: &str) -> FolderId {
        FolderId::new(value).expect("folder id")
    }

    #[test]
    fn notes_shadow_folders_of_the_same_name() {
        let index = TermIndex::build(&Vault::from_snapshot(demo_snapshot()));

        assert_eq!(index.resolve("getting started"), Some(TermTarget::Note(nid("note-3"))));
        assert_eq!(index.folder_for("Getting Started"), Some(&fid("folder-1")));
        assert!(index.terms().iter().all(|t| t.kind() == TermKind::Note));
        assert_eq!(index.terms().len(), 3);
    }

    #[test]
    fn terms_are_sorted_longest_first() {
        let index = TermIndex::build(&Vault::from_snapshot(overlapping_terms()));
        let terms = index.terms().iter().map(|t| t.term()).collect::<Vec<_>>();

        assert_eq!(
            terms,
            vec!["Getting Started Guide", "Getting Started", "Ownership", "Projects", "Rust"]
        );
    }

    #[test]
    fn equal_length_terms_keep_notes_before_folders() {
        let mut vault = Vault::new();
        vault.create_folder("Beta", None).expect("folder");
        vault.create_note("Alfa", "", None).expect("note");
        vault.create_folder("Gama", None).expect("folder");

        let index = TermIndex::build(&vault);
        let terms = index.terms().iter().map(|t| t.term()).collect::<Vec<_>>();
        assert_eq!(terms, vec!["Alfa", "Beta", "Gama"]);
    }

    #[test]
    fn duplicate_folder_names_resolve_to_last_inserted() {
        let mut vault = Vault::new();
        vault.create_folder("Inbox", None).expect("first");
        let second = vault.create_folder("inbox", None).expect("second");

        let index = TermIndex::build(&vault);
        assert_eq!(index.resolve("INBOX"), Some(TermTarget::Folder(second)));
    }

    #[test]
    fn empty_titles_are_not_linkable() {
        let mut snapshot = demo_snapshot();
        snapshot.folders.push(crate::model::Folder::new(fid("folder-empty"), "", None));
        snapshot.folders.push(crate::model::Folder::new(fid("folder-blank"), "  ", None));
        snapshot.folders.push(crate::model::Folder::new(fid("folder-tab"), "\t\n", None));
        let index = TermIndex::build(&Vault::from_snapshot(snapshot));

        assert!(index.terms().iter().all(|t| !t.term().trim().is_empty()));
        assert_eq!(index.terms().len(), 3);
        assert_eq!(
            crate::segment::segment("x  y", &index, None),
            vec![crate::segment::Segment::Text("x  y".to_owned())]
        );
    }

    #[test]
    fn index_remembers_the_revision_it_was_built_from() {
        let mut vault = Vault::from_snapshot(demo_snapshot());
        let before = TermIndex::build(&vault);
        vault.create_note("Fresh", "", None).expect("create");
        let after = TermIndex::build(&vault);

        assert!(after.rev() > before.rev());
        assert!(before.note_for("fresh").is_none());
        assert!(after.note_for("fresh").is_some());
    }

    #[rstest]
    #[case("vi", vec!["Virtual Brain Wiki"])]
    #[case("GETTING", vec!["Getting Started"])]
    #[case("w", vec![])]
    #[case("welcome", vec![])]
    #[case("zz", vec![])]
    fn suggestions_complete_prefixes(#[case] word: &str, #[case] expected: Vec<&str>) {
        let index = TermIndex::build(&Vault::from_snapshot(demo_snapshot()));
        assert_eq!(index.suggestions(word, 7), expected);
    }

    #[test]
    fn suggestions_respect_limit() {
        let mut vault = Vault::new();
        for i in 0..10 {
            vault.create_note(&format!("Topic {i}"), "", None).expect("create");
        }
        let index = TermIndex::build(&vault);
        assert_eq!(index.suggestions("top", 7).len(), 7);
    }

    #[test]
    fn empty_index_has_no_pattern() {
        let index = TermIndex::build(&Vault::new());
        assert!(index.is_empty());
        assert!(index.pattern().is_none());
    }
}
