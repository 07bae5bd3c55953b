// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use chrono::{TimeZone, Utc};

use brainwiki::model::{Folder, FolderId, Note, NoteId, Snapshot};
use brainwiki::segment::Segment;

const FILLER: &[&str] = &[
    "the", "idea", "links", "back", "to", "a", "thought", "about", "memory", "and", "notes",
    "while", "reading", "through", "older", "entries",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub notes: usize,
    pub folders: usize,
    pub words_per_note: usize,
    /// Every n-th word of a body is replaced by another note's title.
    pub link_every: usize,
}

impl Params {
    pub const fn new(
        notes: usize,
        folders: usize,
        words_per_note: usize,
        link_every: usize,
    ) -> Self {
        Self { notes, folders, words_per_note, link_every }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => Params::new(50, 5, 80, 12),
            Self::Medium => Params::new(500, 40, 200, 10),
            Self::Large => Params::new(3_000, 200, 400, 8),
        }
    }
}

// Titles of varying word counts so longest-match ordering matters.
fn note_title(idx: usize) -> String {
    match idx % 3 {
        0 => format!("Topic {idx}"),
        1 => format!("Topic {idx} Overview"),
        _ => format!("Deep Dive Into Topic {idx}"),
    }
}

fn folder_name(idx: usize) -> String {
    format!("Area {idx}")
}

fn body(idx: usize, params: Params) -> String {
    let mut words = Vec::with_capacity(params.words_per_note);
    for w in 0..params.words_per_note {
        if params.link_every > 0 && w % params.link_every == params.link_every - 1 {
            let target = (idx * 31 + w * 7) % params.notes.max(1);
            words.push(note_title(target));
        } else if w % 97 == 96 && params.folders > 0 {
            words.push(folder_name((idx + w) % params.folders));
        } else {
            words.push(FILLER[(idx + w) % FILLER.len()].to_owned());
        }
    }
    words.join(" ")
}

pub fn snapshot(params: Params) -> Snapshot {
    let folders = (0..params.folders)
        .map(|idx| {
            let parent = (idx >= 4).then(|| {
                FolderId::new(format!("folder:{}", idx / 4)).expect("fixture folder id")
            });
            Folder::new(
                FolderId::new(format!("folder:{idx}")).expect("fixture folder id"),
                folder_name(idx),
                parent,
            )
        })
        .collect();

    let notes = (0..params.notes)
        .map(|idx| {
            let at = Utc
                .timestamp_millis_opt(1_700_000_000_000 + idx as i64 * 1_000)
                .single()
                .expect("fixture timestamp");
            let folder = (params.folders > 0 && idx % 2 == 0).then(|| {
                let idx = idx % params.folders;
                FolderId::new(format!("folder:{idx}")).expect("fixture folder id")
            });
            Note::new(
                NoteId::new(format!("note:{idx}")).expect("fixture note id"),
                note_title(idx),
                body(idx, params),
                folder,
                at,
            )
        })
        .collect();

    Snapshot { notes, folders }
}

pub fn fixture(case: Case) -> Snapshot {
    snapshot(case.params())
}

pub fn checksum_segments(segments: &[Segment]) -> u64 {
    let mut acc = 0u64;
    for segment in segments {
        let tag = match segment {
            Segment::Text(_) => 1,
            Segment::NoteRef { .. } => 2,
            Segment::FolderRef { .. } => 3,
        };
        acc = acc.wrapping_mul(131).wrapping_add(tag);
        acc = acc.wrapping_mul(131).wrapping_add(segment.text().len() as u64);
    }
    acc
}
