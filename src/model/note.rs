// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{FolderId, NoteId};

/// A single wiki page. Its title doubles as a linkable term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    folder_id: Option<FolderId>,
    #[serde(with = "ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        folder_id: Option<FolderId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            folder_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn folder_id(&self) -> Option<&FolderId> {
        self.folder_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.touch(now);
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>, now: DateTime<Utc>) {
        self.content = content.into();
        self.touch(now);
    }

    pub(crate) fn set_folder_id(&mut self, folder_id: Option<FolderId>, now: DateTime<Utc>) {
        self.folder_id = folder_id;
        self.touch(now);
    }

    /// Folder deletion moves notes to the root without counting as an edit.
    pub(crate) fn detach_from_folder(&mut self) {
        self.folder_id = None;
    }

    // `updated_at` must strictly advance even when two edits land on the same clock tick.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at =
            if now > self.updated_at { now } else { self.updated_at + Duration::milliseconds(1) };
    }
}
