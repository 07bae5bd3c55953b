// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Load/save hooks towards whatever owns durable storage.
//!
//! The wiki itself is purely in-memory; a [`SnapshotSource`] hands it an initial
//! `{notes, folders}` snapshot and optionally takes one back.

pub mod snapshot_file;

use std::sync::Mutex;

use crate::model::Snapshot;

pub use snapshot_file::{SnapshotFile, StoreError, WriteDurability};

pub trait SnapshotSource {
    fn load(&self) -> Result<Snapshot, StoreError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Keeps the last saved snapshot in memory.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    inner: Mutex<Snapshot>,
}

impl MemorySnapshot {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { inner: Mutex::new(snapshot) }
    }
}

impl SnapshotSource for MemorySnapshot {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let guard = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = snapshot.clone();
        Ok(())
    }
}
