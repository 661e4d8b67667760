//! Directory-backed implementation of the ChainStore trait.
//!
//! Each record lives in `<dir>/<index>.json`, the layout of existing
//! chains. Writes go to a hidden temporary file that is renamed into
//! place, so a record is either complete or absent.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::traits::{ChainStore, InitOutcome};

const EXTENSION: &str = ".json";

/// File-per-block store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a handle for the chain directory. Nothing is touched on disk.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The chain directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `index`.
    pub fn record_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{index}{EXTENSION}"))
    }

    fn temp_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!(".{index}{EXTENSION}.tmp"))
    }

    fn not_initialized(&self) -> StoreError {
        StoreError::NotInitialized(self.dir.display().to_string())
    }
}

/// Parse `<digits>.json` into an index.
fn parse_record_name(name: &str) -> Option<u64> {
    let stem = name.strip_suffix(EXTENSION)?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

impl ChainStore for FileStore {
    fn is_initialized(&self) -> Result<bool> {
        Ok(self.dir.is_dir())
    }

    fn initialize(&self) -> Result<InitOutcome> {
        if self.dir.is_dir() {
            return Ok(InitOutcome::AlreadyPresent);
        }
        fs::create_dir_all(&self.dir)?;
        debug!(dir = %self.dir.display(), "created chain directory");
        Ok(InitOutcome::Created)
    }

    fn exists(&self, index: u64) -> Result<bool> {
        Ok(self.record_path(index).is_file())
    }

    fn read(&self, index: u64) -> Result<Vec<u8>> {
        match fs::read(self.record_path(index)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(index)),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, index: u64, bytes: &[u8]) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(self.not_initialized());
        }

        let tmp = self.temp_path(index);
        let result = (|| -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, self.record_path(index))
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(index, bytes = bytes.len(), "wrote record");
        Ok(())
    }

    fn list_indices(&self) -> Result<BTreeSet<u64>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(self.not_initialized()),
            Err(e) => return Err(e.into()),
        };

        let mut indices = BTreeSet::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(index) = entry.file_name().to_str().and_then(parse_record_name) {
                indices.insert(index);
            }
        }
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> FileStore {
        FileStore::new(tmp.path().join("Blockchain"))
    }

    #[test]
    fn test_parse_record_name() {
        assert_eq!(parse_record_name("0.json"), Some(0));
        assert_eq!(parse_record_name("42.json"), Some(42));
        assert_eq!(parse_record_name(".3.json.tmp"), None);
        assert_eq!(parse_record_name("+3.json"), None);
        assert_eq!(parse_record_name("notes.json"), None);
        assert_eq!(parse_record_name("7.txt"), None);
        assert_eq!(parse_record_name(".json"), None);
    }

    #[test]
    fn test_initialize_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(!store.is_initialized().unwrap());
        assert_eq!(store.initialize().unwrap(), InitOutcome::Created);
        assert!(store.dir().is_dir());
        assert_eq!(store.initialize().unwrap(), InitOutcome::AlreadyPresent);
    }

    #[test]
    fn test_uninitialized_store_errors() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(matches!(store.list_indices(), Err(StoreError::NotInitialized(_))));
        assert!(matches!(store.write(0, b"x"), Err(StoreError::NotInitialized(_))));
        assert!(matches!(store.read(0), Err(StoreError::NotFound(0))));
    }

    #[test]
    fn test_write_read_list() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.initialize().unwrap();

        store.write(0, b"{\"title\":\"g\"}").unwrap();
        store.write(1, b"one").unwrap();
        store.write(2, b"two").unwrap();

        assert_eq!(store.read(2).unwrap(), b"two");
        assert!(store.exists(1).unwrap());
        assert!(store.record_path(1).is_file());
        assert_eq!(store.highest_index().unwrap(), 2);
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.initialize().unwrap();

        store.write(0, b"g").unwrap();
        fs::write(store.dir().join("README"), b"hi").unwrap();
        fs::write(store.dir().join(".9.json.tmp"), b"partial").unwrap();
        fs::create_dir(store.dir().join("5.json")).unwrap();

        assert_eq!(
            store.list_indices().unwrap().into_iter().collect::<Vec<_>>(),
            vec![0]
        );
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.initialize().unwrap();

        store.write(3, b"first").unwrap();
        store.write(3, b"second").unwrap();

        assert_eq!(store.read(3).unwrap(), b"second");
        assert!(!store.temp_path(3).exists());
    }

    #[test]
    fn test_deleted_file_is_gap() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.initialize().unwrap();
        for i in 0..=3 {
            store.write(i, b"r").unwrap();
        }
        fs::remove_file(store.record_path(2)).unwrap();

        assert!(!store.exists(2).unwrap());
        assert_eq!(store.highest_index().unwrap(), 3);
    }
}
