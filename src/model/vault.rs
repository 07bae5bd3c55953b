// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;

use super::folder::Folder;
use super::ids::{FolderId, NoteId};
use super::note::Note;
use super::snapshot::Snapshot;

/// Case-insensitive lookup key shared by title uniqueness checks and the term index.
pub fn term_key(text: &str) -> String {
    text.to_lowercase()
}

/// Result of an idempotent-by-title note creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateNote {
    Created(NoteId),
    /// A note with a case-insensitively equal title already existed; nothing was created.
    Existing(NoteId),
}

impl CreateNote {
    pub fn note_id(&self) -> &NoteId {
        match self {
            Self::Created(id) | Self::Existing(id) => id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// What a folder deletion touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRemoval {
    pub folder: Folder,
    pub reparented_folders: Vec<FolderId>,
    pub reparented_notes: Vec<NoteId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("note not found (id={0})")]
    NoteNotFound(NoteId),
    #[error("folder not found (id={0})")]
    FolderNotFound(FolderId),
    #[error("a note titled '{title}' already exists (id={existing})")]
    DuplicateTitle { title: String, existing: NoteId },
}

/// The authoritative in-memory store of notes and folders.
///
/// Iteration follows insertion order; the term index relies on it for tie-breaking.
/// Every mutation bumps [`Vault::rev`], which is what derived state keys its caches on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vault {
    notes: HashMap<NoteId, Note>,
    note_order: Vec<NoteId>,
    folders: HashMap<FolderId, Folder>,
    folder_order: Vec<FolderId>,
    rev: u64,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vault from an externally supplied snapshot.
    ///
    /// Duplicate ids keep the later entry (at the position of the first). Snapshots are
    /// not re-validated: duplicate titles or dangling parents are tolerated on load.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut vault = Self::new();
        for folder in snapshot.folders {
            vault.insert_folder(folder);
        }
        for note in snapshot.notes {
            vault.insert_note(note);
        }
        vault
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            notes: self.notes().cloned().collect(),
            folders: self.folders().cloned().collect(),
        }
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn note(&self, note_id: &NoteId) -> Option<&Note> {
        self.notes.get(note_id)
    }

    pub fn folder(&self, folder_id: &FolderId) -> Option<&Folder> {
        self.folders.get(folder_id)
    }

    pub fn contains_note(&self, note_id: &NoteId) -> bool {
        self.notes.contains_key(note_id)
    }

    pub fn contains_folder(&self, folder_id: &FolderId) -> bool {
        self.folders.contains_key(folder_id)
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.note_order.iter().filter_map(|id| self.notes.get(id))
    }

    /// Folders in insertion order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> + '_ {
        self.folder_order.iter().filter_map(|id| self.folders.get(id))
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn find_note_by_title(&self, title: &str) -> Option<&Note> {
        let key = term_key(title);
        self.notes().find(|note| term_key(note.title()) == key)
    }

    pub fn create_note(
        &mut self,
        title: &str,
        content: &str,
        folder_id: Option<FolderId>,
    ) -> Result<CreateNote, VaultError> {
        if let Some(existing) = self.find_note_by_title(title) {
            return Ok(CreateNote::Existing(existing.id().clone()));
        }
        self.require_folder(folder_id.as_ref())?;

        let note_id = self.fresh_note_id();
        let note = Note::new(note_id.clone(), title, content, folder_id, Utc::now());
        self.insert_note(note);
        Ok(CreateNote::Created(note_id))
    }

    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> Result<FolderId, VaultError> {
        self.require_folder(parent_id.as_ref())?;

        let folder_id = self.fresh_folder_id();
        self.insert_folder(Folder::new(folder_id.clone(), name, parent_id));
        Ok(folder_id)
    }

    /// Renames a note. Re-casing a note's own title is allowed.
    pub fn rename_note(&mut self, note_id: &NoteId, new_title: &str) -> Result<(), VaultError> {
        if !self.notes.contains_key(note_id) {
            return Err(VaultError::NoteNotFound(note_id.clone()));
        }
        if let Some(existing) = self.find_note_by_title(new_title) {
            if existing.id() != note_id {
                return Err(VaultError::DuplicateTitle {
                    title: new_title.to_owned(),
                    existing: existing.id().clone(),
                });
            }
        }

        let note = self.note_mut(note_id)?;
        note.set_title(new_title, Utc::now());
        self.rev += 1;
        Ok(())
    }

    pub fn update_content(&mut self, note_id: &NoteId, content: &str) -> Result<(), VaultError> {
        let note = self.note_mut(note_id)?;
        note.set_content(content, Utc::now());
        self.rev += 1;
        Ok(())
    }

    pub fn move_note(
        &mut self,
        note_id: &NoteId,
        folder_id: Option<FolderId>,
    ) -> Result<(), VaultError> {
        self.require_folder(folder_id.as_ref())?;
        let note = self.note_mut(note_id)?;
        note.set_folder_id(folder_id, Utc::now());
        self.rev += 1;
        Ok(())
    }

    pub fn delete_note(&mut self, note_id: &NoteId) -> Result<Note, VaultError> {
        let note = self
            .notes
            .remove(note_id)
            .ok_or_else(|| VaultError::NoteNotFound(note_id.clone()))?;
        self.note_order.retain(|id| id != note_id);
        self.rev += 1;
        Ok(note)
    }

    /// Removes a folder and moves its direct children (folders and notes) to the root.
    ///
    /// Grandchildren stay attached to their own parents.
    pub fn delete_folder(&mut self, folder_id: &FolderId) -> Result<FolderRemoval, VaultError> {
        let folder = self
            .folders
            .remove(folder_id)
            .ok_or_else(|| VaultError::FolderNotFound(folder_id.clone()))?;
        self.folder_order.retain(|id| id != folder_id);

        let mut reparented_folders = Vec::new();
        for id in &self.folder_order {
            if let Some(child) = self.folders.get_mut(id) {
                if child.parent_id() == Some(folder_id) {
                    child.detach_from_parent();
                    reparented_folders.push(id.clone());
                }
            }
        }

        let mut reparented_notes = Vec::new();
        for id in &self.note_order {
            if let Some(note) = self.notes.get_mut(id) {
                if note.folder_id() == Some(folder_id) {
                    note.detach_from_folder();
                    reparented_notes.push(id.clone());
                }
            }
        }

        self.rev += 1;
        Ok(FolderRemoval { folder, reparented_folders, reparented_notes })
    }

    fn note_mut(&mut self, note_id: &NoteId) -> Result<&mut Note, VaultError> {
        self.notes.get_mut(note_id).ok_or_else(|| VaultError::NoteNotFound(note_id.clone()))
    }

    fn require_folder(&self, folder_id: Option<&FolderId>) -> Result<(), VaultError> {
        match folder_id {
            Some(id) if !self.folders.contains_key(id) => {
                Err(VaultError::FolderNotFound(id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn insert_note(&mut self, note: Note) {
        let note_id = note.id().clone();
        if self.notes.insert(note_id.clone(), note).is_none() {
            self.note_order.push(note_id);
        }
        self.rev += 1;
    }

    fn insert_folder(&mut self, folder: Folder) {
        let folder_id = folder.id().clone();
        if self.folders.insert(folder_id.clone(), folder).is_none() {
            self.folder_order.push(folder_id);
        }
        self.rev += 1;
    }

    fn fresh_note_id(&self) -> NoteId {
        loop {
            let id = NoteId::generate();
            if !self.notes.contains_key(&id) {
                return id;
            }
        }
    }

    fn fresh_folder_id(&self) -> FolderId {
        loop {
            let id = FolderId::generate();
            if !self.folders.contains_key(&id) {
                return id;
            }
        }
    }
}
