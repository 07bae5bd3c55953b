// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Vault`] owns notes and folders; folders form a forest and notes optionally live in one.

pub(crate) mod fixtures;
pub mod folder;
pub mod ids;
pub mod note;
pub mod snapshot;
pub mod vault;

pub use fixtures::demo_snapshot;
pub use folder::Folder;
pub use ids::{FolderId, Id, IdError, IdKind, NoteId};
pub use note::Note;
pub use snapshot::Snapshot;
pub use vault::{term_key, CreateNote, FolderRemoval, Vault, VaultError};
