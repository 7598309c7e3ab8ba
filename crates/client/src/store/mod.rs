//! Persisted state snapshots.
//!
//! The session and cart live in two independently keyed JSON files under the
//! configured state directory, loaded when a store opens and written after
//! every mutation. One fixed key per store, the value a serialized snapshot
//! of the state shape.

pub mod cart;
pub mod session;

pub use cart::CartStore;
pub use session::{Session, SessionStore};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Fixed snapshot keys, one file per store.
pub mod keys {
    /// Session snapshot file stem.
    pub const AUTH: &str = "auth-storage";

    /// Cart snapshot file stem.
    pub const CART: &str = "cart-storage";
}

/// Errors that can occur when loading or saving a state snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot contents are not valid JSON for the expected shape.
    #[error("corrupt snapshot {key}: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded.
    #[error("failed to encode snapshot {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn snapshot_path(state_dir: &Path, key: &str) -> PathBuf {
    state_dir.join(format!("{key}.json"))
}

/// Load a snapshot. `Ok(None)` when no snapshot has been written yet.
fn load_snapshot<T: DeserializeOwned>(
    state_dir: &Path,
    key: &'static str,
) -> Result<Option<T>, StoreError> {
    let path = snapshot_path(state_dir, key);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::Io(err)),
    };
    let value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { key, source })?;
    Ok(Some(value))
}

/// Write a snapshot, creating the state directory on first use.
fn save_snapshot<T: Serialize>(
    state_dir: &Path,
    key: &'static str,
    value: &T,
) -> Result<(), StoreError> {
    fs::create_dir_all(state_dir)?;
    let raw =
        serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode { key, source })?;
    fs::write(snapshot_path(state_dir, key), raw)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<Vec<u32>> = load_snapshot(dir.path(), "missing").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        save_snapshot(dir.path(), "numbers", &vec![1_u32, 2, 3]).unwrap();

        let loaded: Option<Vec<u32>> = load_snapshot(dir.path(), "numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_save_creates_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("state");
        save_snapshot(&nested, "numbers", &vec![1_u32]).unwrap();

        assert!(nested.join("numbers.json").exists());
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(snapshot_path(dir.path(), "bad"), "{not json").unwrap();

        let result: Result<Option<Vec<u32>>, _> = load_snapshot(dir.path(), "bad");
        assert!(matches!(result, Err(StoreError::Corrupt { key: "bad", .. })));
    }
}
