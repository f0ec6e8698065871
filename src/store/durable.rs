//! Atomic whole-file replacement
//!
//! The message file is only ever replaced, never edited in place:
//! 1. Write the new bytes to a sibling `<name>.tmp`
//! 2. fsync the temp file
//! 3. Rename temp over the target (atomic on POSIX)
//! 4. fsync the parent directory so the rename itself is durable
//!
//! A reader therefore always sees either the old complete document or the
//! new complete document.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};

/// Sibling temp path used while replacing `path`.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("messages"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces the file at `path` with `bytes` atomically.
///
/// # Errors
///
/// Returns `StoreError::Io` if any step fails. The temp file is removed on
/// failure and the target keeps its previous content.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let temp_path = temp_path_for(path);

    let result = write_and_rename(path, &temp_path, bytes);
    if result.is_err() && temp_path.exists() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    // Best effort: some platforms cannot open directories for fsync.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

fn write_and_rename(path: &Path, temp_path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| StoreError::io_at("create temp file", temp_path, e))?;

    file.write_all(bytes)
        .map_err(|e| StoreError::io_at("write temp file", temp_path, e))?;

    file.sync_all()
        .map_err(|e| StoreError::io_at("fsync temp file", temp_path, e))?;

    drop(file);

    fs::rename(temp_path, path).map_err(|e| StoreError::io_at("replace message file", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("/data/messages.json"));
        assert_eq!(temp, PathBuf::from("/data/messages.json.tmp"));
    }

    #[test]
    fn test_write_creates_and_replaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("messages.json");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_missing_parent_fails_without_residue() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent").join("messages.json");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_rename_keeps_target_and_cleans_temp() {
        let tmp = TempDir::new().unwrap();
        // A non-empty directory at the target path cannot be replaced by a file.
        let path = tmp.path().join("messages.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        assert!(write_atomic(&path, b"data").is_err());
        assert!(path.join("keep").exists());
        assert!(!temp_path_for(&path).exists());
    }
}
