//! JSON snapshots of a [`MemoryStore`].
//!
//! The file holds a version number, a save timestamp and the full store.
//! Writes go to a temp file that is renamed over the target.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::memory::MemoryStore;

/// Snapshot format version written by [`save`].
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    store: &'a MemoryStore,
}

#[derive(Deserialize)]
struct SnapshotVersion {
    version: u32,
}

#[derive(Deserialize)]
struct SnapshotIn {
    store: MemoryStore,
}

/// Loads a store from `path`. A missing file yields an empty store.
pub fn load(path: &Path) -> Result<MemoryStore> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot yet, starting empty");
            return Ok(MemoryStore::new());
        }
        Err(e) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let header: SnapshotVersion =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
            path: path.to_path_buf(),
            source: e,
        })?;
    if header.version > CURRENT_SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: header.version,
            max_supported: CURRENT_SNAPSHOT_VERSION,
            path: path.to_path_buf(),
        });
    }

    let snapshot: SnapshotIn =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!(
        path = %path.display(),
        records = snapshot.store.record_count(),
        "loaded snapshot"
    );
    Ok(snapshot.store)
}

/// Saves `store` to `path` atomically, creating parent directories.
pub fn save(store: &MemoryStore, path: &Path) -> Result<()> {
    let snapshot = SnapshotOut {
        version: CURRENT_SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        store,
    };
    let bytes = serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), "saved snapshot");
    Ok(())
}
