// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{Duration, Utc};

use super::folder::Folder;
use super::ids::{FolderId, NoteId};
use super::note::Note;
use super::snapshot::Snapshot;

fn nid(value: &str) -> NoteId {
    NoteId::new(value).expect("fixture note id")
}

fn fid(value: &str) -> FolderId {
    FolderId::new(value).expect("fixture folder id")
}

/// The welcome wiki a fresh install starts with.
///
/// Note that the "Getting Started" folder is shadowed by the "Getting Started" note.
pub fn demo_snapshot() -> Snapshot {
    let now = Utc::now();
    let folder = fid("folder-1");

    Snapshot {
        folders: vec![Folder::new(folder.clone(), "Getting Started", None)],
        notes: vec![
            Note::new(
                nid("note-1"),
                "Welcome",
                "This is your first note in your Virtual Brain Wiki. Try clicking on terms like \
                 Virtual Brain Wiki to see what happens. You can create new notes from any word. \
                 Words that are already note titles will appear in blue, and folder titles like \
                 Getting Started will appear in purple.",
                Some(folder.clone()),
                now,
            ),
            Note::new(
                nid("note-2"),
                "Virtual Brain Wiki",
                "A Virtual Brain Wiki is a personal knowledge management system that uses \
                 bidirectional links to connect ideas. This allows you to navigate your thoughts \
                 in a non-linear way, mimicking how a brain works.",
                Some(folder.clone()),
                now - Duration::seconds(10),
            ),
            Note::new(
                nid("note-3"),
                "Getting Started",
                "To get started, simply start writing! Select any text to create a new note or \
                 get an AI definition. Organize your notes into folders on the left.",
                Some(folder),
                now - Duration::seconds(20),
            ),
        ],
    }
}

/// Folder "Getting Started" next to note "Getting Started Guide", plus a nested folder tree.
#[cfg(test)]
pub(crate) fn overlapping_terms() -> Snapshot {
    let now = Utc::now();
    Snapshot {
        folders: vec![
            Folder::new(fid("f:start"), "Getting Started", None),
            Folder::new(fid("f:projects"), "Projects", None),
            Folder::new(fid("f:rust"), "Rust", Some(fid("f:projects"))),
        ],
        notes: vec![
            Note::new(nid("n:guide"), "Getting Started Guide", "Read me first.", None, now),
            Note::new(
                nid("n:ownership"),
                "Ownership",
                "Ownership is how Rust manages memory. See the Getting Started Guide info.",
                Some(fid("f:rust")),
                now,
            ),
        ],
    }
}
