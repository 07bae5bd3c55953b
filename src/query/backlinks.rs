// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::index::TermIndex;
use crate::model::{Note, NoteId, Vault};
use crate::segment::{segment, Segment};

/// Notes whose body links to `note_id`, in vault order.
///
/// Links are recomputed from content, so a rename immediately changes who links where.
pub fn backlinks<'a>(vault: &'a Vault, index: &TermIndex, note_id: &NoteId) -> Vec<&'a Note> {
    vault
        .notes()
        .filter(|note| note.id() != note_id)
        .filter(|note| {
            segment(note.content(), index, Some(note.id())).iter().any(|seg| {
                matches!(seg, Segment::NoteRef { note_id: target, .. } if target == note_id)
            })
        })
        .collect()
}
