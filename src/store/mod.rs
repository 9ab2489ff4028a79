// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Persistent key-value storage.
//!
//! Favourites and the recently played history survive restarts by being
//! written, as JSON arrays of tracks, to a small key-value store. The
//! [`KeyValueStore`] trait is the seam; [`FileStore`] keeps one JSON file per
//! key in the application data directory.
//!
//! Writes are replaced atomically: the blob is written to a temporary file
//! next to the target and renamed over it.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::model::Track;

pub(crate) const FAVOURITES_KEY: &str = "favorites";
pub(crate) const RECENT_TRACKS_KEY: &str = "recentTracks";

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("invalid store key '{0}'")]
    InvalidKey(String),

    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialisation failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub(crate) trait KeyValueStore: Send {
    /// Returns the blob stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous blob.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub(crate) struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) entries: std::collections::HashMap<String, String>,
    pub(crate) fail_writes: bool,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(std::io::Error::other("simulated write failure").into());
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the tracks stored under `key`.
///
/// A missing key yields no tracks. An unreadable or malformed blob is logged
/// and also yields no tracks; startup never fails because of storage.
pub(crate) fn load_tracks(store: &dyn KeyValueStore, key: &str) -> Vec<Track> {
    let blob = match store.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return vec![],
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read from store");
            return vec![];
        }
    };

    match serde_json::from_str::<Vec<Track>>(&blob) {
        Ok(tracks) => tracks,
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed stored tracks");
            vec![]
        }
    }
}

/// Serialises `tracks` and stores them under `key`.
pub(crate) fn save_tracks(
    store: &mut dyn KeyValueStore,
    key: &str,
    tracks: &[Track],
) -> Result<(), StoreError> {
    let blob = serde_json::to_string(tracks)?;
    store.set(key, &blob)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::model::track::track;

    #[test]
    fn file_store_round_trips_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get(FAVOURITES_KEY).unwrap(), None);

        store.set(FAVOURITES_KEY, "[1]").unwrap();
        store.set(FAVOURITES_KEY, "[2]").unwrap();

        assert_eq!(store.get(FAVOURITES_KEY).unwrap().as_deref(), Some("[2]"));
        assert!(store.dir().join("favorites.json").exists());
        assert!(!store.dir().join("favorites.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());

        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(store.get(key), Err(StoreError::InvalidKey(_))));
            assert!(matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))));
        }
    }

    #[test]
    fn tracks_use_the_original_blob_format() {
        let mut store = MemoryStore::default();
        save_tracks(&mut store, RECENT_TRACKS_KEY, &[track("a", "200")]).unwrap();

        let blob = store.get(RECENT_TRACKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["artist"], "Artist a");
        assert_eq!(value[0]["image"], "https://img.example/a.png");
        assert_eq!(value[0]["duration"], "200");

        let loaded = load_tracks(&store, RECENT_TRACKS_KEY);
        assert_eq!(loaded, vec![track("a", "200")]);
        assert_eq!(loaded[0].name, "Track a");
    }

    #[test]
    fn load_tracks_tolerates_missing_and_malformed_blobs() {
        let mut store = MemoryStore::default();
        assert!(load_tracks(&store, FAVOURITES_KEY).is_empty());

        store.set(FAVOURITES_KEY, "{not json").unwrap();
        assert!(load_tracks(&store, FAVOURITES_KEY).is_empty());
    }

    #[test]
    fn load_tracks_from_file_store() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        save_tracks(&mut store, FAVOURITES_KEY, &[track("x", "5"), track("y", "6")]).unwrap();

        let reopened = FileStore::new(dir.path());
        let ids: Vec<String> = load_tracks(&reopened, FAVOURITES_KEY)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
    }
}
