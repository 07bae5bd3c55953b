// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a vault.
//!
//! Queries provide the derived views (listings, breadcrumbs, search, backlinks) that sidebars
//! and the CLI render.

pub mod backlinks;
pub mod listing;
pub mod search;

pub use backlinks::backlinks;
pub use listing::{
    child_folders, folder_path, folder_path_label, notes_in_folder, sorted_notes, SortOrder,
    PATH_SEPARATOR,
};
pub use search::{search_notes, SearchMode, FUZZY_THRESHOLD};
