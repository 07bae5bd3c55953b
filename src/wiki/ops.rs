// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User intents and the delta they produce.
//!
//! A view sends [`WikiOp`]s; applying a batch either succeeds completely or leaves the wiki
//! untouched, and reports a minimal [`Delta`] the view can use to refresh derived state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{FolderId, NoteId, VaultError};

/// Where a newly created note goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// The active folder, or the root when no folder is active.
    #[default]
    Active,
    Root,
    Folder(FolderId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WikiOp {
    CreateNote {
        title: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        placement: Placement,
    },
    CreateFolder {
        name: String,
        #[serde(default)]
        parent_id: Option<FolderId>,
    },
    RenameNote {
        note_id: NoteId,
        title: String,
    },
    UpdateContent {
        note_id: NoteId,
        content: String,
    },
    MoveNote {
        note_id: NoteId,
        #[serde(default)]
        folder_id: Option<FolderId>,
    },
    DeleteNote {
        note_id: NoteId,
    },
    DeleteFolder {
        folder_id: FolderId,
    },
    SelectNote {
        note_id: NoteId,
    },
    /// `None` selects the root ("all notes").
    SelectFolder {
        #[serde(default)]
        folder_id: Option<FolderId>,
    },
    NavigateTo {
        note_id: NoteId,
    },
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Note(NoteId),
    Folder(FolderId),
}

/// Entities touched by an applied batch. Navigation-only ops leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applied {
    /// Vault revision after the batch.
    pub revision: u64,
    pub applied: usize,
    pub delta: Delta,
}

#[derive(Debug, Default)]
pub(crate) struct DeltaBuilder {
    added: BTreeSet<EntityRef>,
    removed: BTreeSet<EntityRef>,
    updated: BTreeSet<EntityRef>,
}

impl DeltaBuilder {
    pub(crate) fn record_added(&mut self, entity: EntityRef) {
        self.removed.remove(&entity);
        self.updated.remove(&entity);
        self.added.insert(entity);
    }

    pub(crate) fn record_removed(&mut self, entity: EntityRef) {
        self.updated.remove(&entity);
        // Added then removed within one batch: the view never saw it.
        if !self.added.remove(&entity) {
            self.removed.insert(entity);
        }
    }

    pub(crate) fn record_updated(&mut self, entity: EntityRef) {
        if self.added.contains(&entity) || self.removed.contains(&entity) {
            return;
        }
        self.updated.insert(entity);
    }

    pub(crate) fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("folder name must not be empty")]
    EmptyName,
    #[error("note not found (id={0})")]
    NoteNotFound(NoteId),
    #[error("folder not found (id={0})")]
    FolderNotFound(FolderId),
    #[error("a note titled '{title}' already exists (id={existing})")]
    DuplicateTitle { title: String, existing: NoteId },
}

impl ApplyError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound(_) | Self::FolderNotFound(_))
    }
}

impl From<VaultError> for ApplyError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::NoteNotFound(id) => Self::NoteNotFound(id),
            VaultError::FolderNotFound(id) => Self::FolderNotFound(id),
            VaultError::DuplicateTitle { title, existing } => {
                Self::DuplicateTitle { title, existing }
            }
        }
    }
}
