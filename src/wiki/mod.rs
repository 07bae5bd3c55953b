// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The mutation façade: the single entry point that changes a wiki.
//!
//! [`Wiki`] owns the vault, the navigation history and the active folder. Every mutation goes
//! through it so that the three stay consistent and the term index is invalidated. The index is
//! rebuilt lazily on the first read after a change, so a burst of edits costs one rebuild.

pub mod ops;

use std::cell::OnceCell;

use crate::config::WikiConfig;
use crate::index::{self, current_word, Completion, TermIndex};
use crate::model::{CreateNote, Folder, FolderId, FolderRemoval, Note, NoteId, Snapshot, Vault};
use crate::nav::NavigationStack;
use crate::query;
use crate::segment::{self, Segment, WordTarget};

pub use ops::{Applied, ApplyError, Delta, EntityRef, Placement, WikiOp};

use ops::DeltaBuilder;

#[derive(Debug, Clone)]
pub struct Wiki {
    vault: Vault,
    nav: NavigationStack,
    active_folder: Option<FolderId>,
    config: WikiConfig,
    index: OnceCell<TermIndex>,
}

impl Default for Wiki {
    fn default() -> Self {
        Self::new(WikiConfig::default())
    }
}

impl Wiki {
    pub fn new(config: WikiConfig) -> Self {
        Self::from_snapshot(Snapshot::default(), config)
    }

    pub fn from_snapshot(snapshot: Snapshot, config: WikiConfig) -> Self {
        let vault = Vault::from_snapshot(snapshot);
        tracing::debug!(notes = vault.note_count(), folders = vault.folder_count(), "wiki opened");
        Self {
            vault,
            nav: NavigationStack::with_limit(config.history_limit),
            active_folder: None,
            config,
            index: OnceCell::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.vault.snapshot()
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.vault.rev()
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.nav
    }

    /// The term index for the current revision, rebuilt if a mutation made it stale.
    pub fn index(&self) -> &TermIndex {
        let index = self.index.get_or_init(|| {
            let index = TermIndex::build(&self.vault);
            tracing::debug!(rev = index.rev(), terms = index.terms().len(), "term index rebuilt");
            index
        });
        debug_assert_eq!(index.rev(), self.vault.rev());
        index
    }

    fn invalidate(&mut self) {
        self.index.take();
    }

    // ----- reads -----

    pub fn note(&self, note_id: &NoteId) -> Option<&Note> {
        self.vault.note(note_id)
    }

    pub fn folder(&self, folder_id: &FolderId) -> Option<&Folder> {
        self.vault.folder(folder_id)
    }

    pub fn active_note_id(&self) -> Option<&NoteId> {
        self.nav.active()
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.nav.active().and_then(|id| self.vault.note(id))
    }

    pub fn active_folder_id(&self) -> Option<&FolderId> {
        self.active_folder.as_ref()
    }

    pub fn active_folder(&self) -> Option<&Folder> {
        self.active_folder.as_ref().and_then(|id| self.vault.folder(id))
    }

    /// Segments a note's content with self-references suppressed. `None` for unknown ids.
    pub fn segments_for(&self, note_id: &NoteId) -> Option<Vec<Segment>> {
        let note = self.vault.note(note_id)?;
        Some(segment::segment(note.content(), self.index(), Some(note_id)))
    }

    pub fn render_active(&self) -> Option<Vec<Segment>> {
        let id = self.nav.active()?;
        self.segments_for(id)
    }

    pub fn resolve_word(&self, word: &str) -> Option<WordTarget> {
        segment::resolve_word(word, self.index())
    }

    /// Autocomplete for the word ending at `cursor` in `text`.
    pub fn suggestions(&self, text: &str, cursor: usize) -> Vec<&str> {
        let Some((_, word)) = current_word(text, cursor) else {
            return Vec::new();
        };
        self.index().suggestions(word, self.config.suggestion_limit)
    }

    pub fn apply_suggestion(
        &self,
        text: &str,
        cursor: usize,
        suggestion: &str,
    ) -> Option<Completion> {
        index::apply_suggestion(text, cursor, suggestion)
    }

    /// Breadcrumb of the active note's folder; `None` when the note sits at the root.
    pub fn active_note_path(&self) -> Option<String> {
        let folder_id = self.active_note()?.folder_id()?;
        query::folder_path_label(&self.vault, folder_id)
    }

    pub fn backlinks(&self, note_id: &NoteId) -> Vec<&Note> {
        query::backlinks(&self.vault, self.index(), note_id)
    }

    // ----- intents -----

    pub fn apply(&mut self, op: WikiOp) -> Result<Applied, ApplyError> {
        self.apply_all(vec![op])
    }

    /// Applies `ops` in order. On the first failure the wiki is restored to its prior state.
    pub fn apply_all(&mut self, ops: Vec<WikiOp>) -> Result<Applied, ApplyError> {
        let applied = ops.len();
        // Single ops validate before mutating, so only batches need a checkpoint.
        let checkpoint = (applied > 1).then(|| {
            (self.vault.clone(), self.nav.clone(), self.active_folder.clone())
        });
        let mut delta = DeltaBuilder::default();

        for op in ops {
            if let Err(err) = self.apply_one(op, &mut delta) {
                if let Some((vault, nav, active_folder)) = checkpoint {
                    self.vault = vault;
                    self.nav = nav;
                    self.active_folder = active_folder;
                    self.invalidate();
                }
                tracing::debug!(error = %err, "wiki ops rejected");
                return Err(err);
            }
        }

        Ok(Applied { revision: self.vault.rev(), applied, delta: delta.finish() })
    }

    fn apply_one(&mut self, op: WikiOp, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
        match op {
            WikiOp::CreateNote { title, content, placement } => {
                if let CreateNote::Created(id) = self.create_note(&title, &content, placement)? {
                    delta.record_added(EntityRef::Note(id));
                }
            }
            WikiOp::CreateFolder { name, parent_id } => {
                let id = self.create_folder(&name, parent_id)?;
                delta.record_added(EntityRef::Folder(id));
            }
            WikiOp::RenameNote { note_id, title } => {
                self.rename_note(&note_id, &title)?;
                delta.record_updated(EntityRef::Note(note_id));
            }
            WikiOp::UpdateContent { note_id, content } => {
                self.update_content(&note_id, &content)?;
                delta.record_updated(EntityRef::Note(note_id));
            }
            WikiOp::MoveNote { note_id, folder_id } => {
                self.move_note(&note_id, folder_id)?;
                delta.record_updated(EntityRef::Note(note_id));
            }
            WikiOp::DeleteNote { note_id } => {
                self.delete_note(&note_id)?;
                delta.record_removed(EntityRef::Note(note_id));
            }
            WikiOp::DeleteFolder { folder_id } => {
                let removal = self.delete_folder(&folder_id)?;
                for id in removal.reparented_folders {
                    delta.record_updated(EntityRef::Folder(id));
                }
                for id in removal.reparented_notes {
                    delta.record_updated(EntityRef::Note(id));
                }
                delta.record_removed(EntityRef::Folder(folder_id));
            }
            WikiOp::SelectNote { note_id } => self.select_note(&note_id)?,
            WikiOp::SelectFolder { folder_id } => self.select_folder(folder_id)?,
            WikiOp::NavigateTo { note_id } => self.navigate_to(&note_id)?,
            WikiOp::Back => {
                self.back();
            }
        }
        Ok(())
    }

    /// Creates a note, or navigates to the existing one with the same title.
    ///
    /// A created note becomes the fresh root of the navigation history.
    pub fn create_note(
        &mut self,
        title: &str,
        content: &str,
        placement: Placement,
    ) -> Result<CreateNote, ApplyError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApplyError::EmptyTitle);
        }
        let folder_id = match placement {
            Placement::Active => self.active_folder.clone(),
            Placement::Root => None,
            Placement::Folder(id) => Some(id),
        };

        let created = self.vault.create_note(title, content, folder_id)?;
        match &created {
            CreateNote::Created(id) => {
                self.invalidate();
                self.nav.select(id.clone());
                self.sync_active_folder();
                tracing::debug!(note_id = %id, rev = self.vault.rev(), "note created");
            }
            CreateNote::Existing(id) => {
                tracing::debug!(note_id = %id, "note title exists; navigating");
                self.navigate_to(id)?;
            }
        }
        Ok(created)
    }

    /// Creates a folder and makes it active. History is cleared.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> Result<FolderId, ApplyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplyError::EmptyName);
        }
        let id = self.vault.create_folder(name, parent_id)?;
        self.invalidate();
        self.active_folder = Some(id.clone());
        self.nav.clear();
        tracing::debug!(folder_id = %id, rev = self.vault.rev(), "folder created");
        Ok(id)
    }

    pub fn rename_note(&mut self, note_id: &NoteId, title: &str) -> Result<(), ApplyError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApplyError::EmptyTitle);
        }
        self.vault.rename_note(note_id, title)?;
        self.invalidate();
        tracing::debug!(%note_id, rev = self.vault.rev(), "note renamed");
        Ok(())
    }

    pub fn update_content(&mut self, note_id: &NoteId, content: &str) -> Result<(), ApplyError> {
        self.vault.update_content(note_id, content)?;
        self.invalidate();
        tracing::debug!(%note_id, bytes = content.len(), "note content updated");
        Ok(())
    }

    pub fn move_note(
        &mut self,
        note_id: &NoteId,
        folder_id: Option<FolderId>,
    ) -> Result<(), ApplyError> {
        self.vault.move_note(note_id, folder_id)?;
        self.invalidate();
        if self.nav.active() == Some(note_id) {
            self.sync_active_folder();
        }
        tracing::debug!(%note_id, "note moved");
        Ok(())
    }

    /// Deletes a note. If it was active, the history steps back first.
    pub fn delete_note(&mut self, note_id: &NoteId) -> Result<Note, ApplyError> {
        let note = self.vault.delete_note(note_id)?;
        self.invalidate();
        let was_active = self.nav.active() == Some(note_id);
        self.nav.forget(note_id);
        if was_active {
            self.sync_active_folder();
        }
        tracing::debug!(%note_id, rev = self.vault.rev(), "note deleted");
        Ok(note)
    }

    /// Deletes a folder; its direct children move to the root.
    pub fn delete_folder(&mut self, folder_id: &FolderId) -> Result<FolderRemoval, ApplyError> {
        let removal = self.vault.delete_folder(folder_id)?;
        self.invalidate();
        if self.active_folder.as_ref() == Some(folder_id) {
            self.active_folder = None;
        }
        tracing::debug!(
            %folder_id,
            reparented_folders = removal.reparented_folders.len(),
            reparented_notes = removal.reparented_notes.len(),
            "folder deleted"
        );
        Ok(removal)
    }

    pub fn select_note(&mut self, note_id: &NoteId) -> Result<(), ApplyError> {
        self.require_note(note_id)?;
        self.nav.select(note_id.clone());
        self.sync_active_folder();
        Ok(())
    }

    /// Makes `folder_id` (or the root) active and clears the history.
    pub fn select_folder(&mut self, folder_id: Option<FolderId>) -> Result<(), ApplyError> {
        if let Some(id) = &folder_id {
            if !self.vault.contains_folder(id) {
                return Err(ApplyError::FolderNotFound(id.clone()));
            }
        }
        self.active_folder = folder_id;
        self.nav.clear();
        Ok(())
    }

    pub fn navigate_to(&mut self, note_id: &NoteId) -> Result<(), ApplyError> {
        self.require_note(note_id)?;
        self.nav.navigate_to(note_id.clone());
        self.sync_active_folder();
        Ok(())
    }

    /// Steps back in history. Returns the newly active note, or `None` if there was nowhere
    /// to go.
    pub fn back(&mut self) -> Option<&NoteId> {
        self.nav.back()?;
        self.sync_active_folder();
        self.nav.active()
    }

    fn require_note(&self, note_id: &NoteId) -> Result<(), ApplyError> {
        if self.vault.contains_note(note_id) {
            Ok(())
        } else {
            Err(ApplyError::NoteNotFound(note_id.clone()))
        }
    }

    // The active folder follows the active note; with no active note it is left alone.
    fn sync_active_folder(&mut self) {
        if let Some(note) = self.nav.active().and_then(|id| self.vault.note(id)) {
            self.active_folder = note.folder_id().cloned();
        }
    }
}
