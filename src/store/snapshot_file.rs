// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use super::SnapshotSource;
use crate::model::Snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot lock poisoned")]
    Poisoned,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,
    /// Also syncs the file and (on unix) its directory.
    Durable,
}

/// A snapshot stored as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, or an empty one when the file does not exist yet.
    pub fn load_or_default(&self) -> Result<Snapshot, StoreError> {
        match self.load() {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Snapshot::default())
            }
            Err(err) => Err(err),
        }
    }
}

impl SnapshotSource for SnapshotFile {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        tracing::info!(
            path = %self.path.display(),
            notes = snapshot.notes.len(),
            folders = snapshot.folders.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, format!("{json}\n").as_bytes(), self.durability)?;
        tracing::info!(
            path = %self.path.display(),
            notes = snapshot.notes.len(),
            folders = snapshot.folders.len(),
            "snapshot saved"
        );
        Ok(())
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { path: path.to_path_buf(), source }
}

fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(io_err(&parent))?;

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = parent.join(format!(".brainwiki.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_err(&tmp_path))?;
    file.write_all(contents).map_err(io_err(&tmp_path))?;
    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_err(&tmp_path))?;
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(&parent).map_err(io_err(&parent))?;
            dir.sync_all().map_err(io_err(&parent))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{SnapshotFile, StoreError, WriteDurability};
    use crate::model::{demo_snapshot, Snapshot};
    use crate::store::{MemorySnapshot, SnapshotSource};

    #[fixture]
    fn tmp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[rstest]
    #[case(WriteDurability::BestEffort)]
    #[case(WriteDurability::Durable)]
    fn save_then_load_returns_same_snapshot(tmp: TempDir, #[case] durability: WriteDurability) {
        let file =
            SnapshotFile::new(tmp.path().join("nested/wiki.json")).with_durability(durability);
        let snapshot = demo_snapshot();

        file.save(&snapshot).expect("save");
        let loaded = file.load().expect("load");

        // Timestamps are stored with millisecond precision.
        assert_eq!(loaded.notes.len(), snapshot.notes.len());
        assert_eq!(loaded.folders, snapshot.folders);
        for (a, b) in loaded.notes.iter().zip(&snapshot.notes) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.title(), b.title());
            assert_eq!(a.content(), b.content());
            assert_eq!(a.created_at().timestamp_millis(), b.created_at().timestamp_millis());
        }

        let leftovers = std::fs::read_dir(tmp.path().join("nested"))
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".brainwiki.tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[rstest]
    fn missing_file_loads_as_empty(tmp: TempDir) {
        let file = SnapshotFile::new(tmp.path().join("absent.json"));
        assert!(matches!(file.load(), Err(StoreError::Io { .. })));
        assert_eq!(file.load_or_default().expect("default"), Snapshot::default());
    }

    #[rstest]
    fn malformed_json_reports_path(tmp: TempDir) {
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{ not json").expect("write");

        let err = SnapshotFile::new(&path).load_or_default().unwrap_err();
        match err {
            StoreError::Json { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected json error, got {other}"),
        }
    }

    #[test]
    fn snapshot_accepts_original_field_names() {
        let json = r#"{
            "folders": [{ "id": "folder-1", "name": "Getting Started", "parentId": null }],
            "notes": [{
                "id": "note-1", "title": "Welcome", "content": "hi",
                "folderId": "folder-1", "createdAt": 1700000000000, "updatedAt": 1700000000500
            }]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        assert_eq!(snapshot.notes[0].folder_id().map(|f| f.as_str()), Some("folder-1"));
        assert_eq!(snapshot.notes[0].updated_at().timestamp_millis(), 1_700_000_000_500);
    }

    #[test]
    fn memory_snapshot_keeps_last_save() {
        let source = MemorySnapshot::default();
        assert_eq!(source.load().expect("load"), Snapshot::default());

        source.save(&demo_snapshot()).expect("save");
        assert_eq!(source.load().expect("load").notes.len(), 3);
    }
}
