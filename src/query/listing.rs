// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{term_key, Folder, FolderId, Note, Vault};

pub const PATH_SEPARATOR: &str = " / ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Most recently edited first.
    #[default]
    UpdatedAt,
    /// Newest first.
    CreatedAt,
    /// Case-insensitive by title.
    Alphabetical,
}

fn compare_notes(order: SortOrder, a: &Note, b: &Note) -> Ordering {
    match order {
        SortOrder::UpdatedAt => b.updated_at().cmp(&a.updated_at()),
        SortOrder::CreatedAt => b.created_at().cmp(&a.created_at()),
        SortOrder::Alphabetical => term_key(a.title())
            .cmp(&term_key(b.title()))
            .then_with(|| a.title().cmp(b.title())),
    }
}

pub fn sorted_notes(vault: &Vault, order: SortOrder) -> Vec<&Note> {
    let mut notes = vault.notes().collect::<Vec<_>>();
    notes.sort_by(|a, b| compare_notes(order, a, b));
    notes
}

/// Notes directly inside `folder_id` (`None` = the root).
pub fn notes_in_folder<'a>(
    vault: &'a Vault,
    folder_id: Option<&FolderId>,
    order: SortOrder,
) -> Vec<&'a Note> {
    let mut notes = vault.notes().filter(|note| note.folder_id() == folder_id).collect::<Vec<_>>();
    notes.sort_by(|a, b| compare_notes(order, a, b));
    notes
}

/// Direct child folders of `parent_id` (`None` = root folders), in insertion order.
pub fn child_folders<'a>(vault: &'a Vault, parent_id: Option<&FolderId>) -> Vec<&'a Folder> {
    vault.folders().filter(|folder| folder.parent_id() == parent_id).collect()
}

/// Folders from the root down to `folder_id`.
///
/// The walk stops at a missing parent. Parent chains are assumed acyclic but not trusted: a
/// cycle ends the walk at the first repeated folder.
pub fn folder_path<'a>(vault: &'a Vault, folder_id: &FolderId) -> Vec<&'a Folder> {
    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = vault.folder(folder_id);

    while let Some(folder) = cursor {
        if !seen.insert(folder.id()) {
            tracing::warn!(folder_id = %folder.id(), "folder parent chain contains a cycle");
            break;
        }
        path.push(folder);
        cursor = folder.parent_id().and_then(|parent| vault.folder(parent));
    }

    path.reverse();
    path
}

/// Breadcrumb such as `Projects / Rust`; `None` for an unknown folder.
pub fn folder_path_label(vault: &Vault, folder_id: &FolderId) -> Option<String> {
    let path = folder_path(vault, folder_id);
    if path.is_empty() {
        return None;
    }
    Some(path.iter().map(|folder| folder.name()).collect::<Vec<_>>().join(PATH_SEPARATOR))
}
