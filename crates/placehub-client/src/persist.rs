//! JSON files kept beside the client: bookmarks and the last Serper result.
//!
//! Writes go to a sibling temp file that is then renamed over the target.
//! Reads treat a missing or undecodable file as absent.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Errors raised while writing a local JSON file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The file could not be written or removed.
    #[error("local file error: {0}")]
    Io(#[from] io::Error),

    /// The value could not be encoded.
    #[error("local file encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub(crate) fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Read and decode `path`. `None` when it is missing, unreadable, or corrupt.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read local file");
            return None;
        }
    };

    serde_json::from_slice(&bytes)
        .inspect_err(|e| warn!(path = %path.display(), error = %e, "ignoring corrupt local file"))
        .ok()
}

/// Delete `path`. A file that is already gone is not an error.
pub(crate) fn remove(path: &Path) -> Result<(), PersistError> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("v.json");
        save_json(&path, &vec![1, 2, 3]).unwrap();

        assert_eq!(load_json::<Vec<u32>>(&path), Some(vec![1, 2, 3]));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_or_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.json");
        assert_eq!(load_json::<Vec<u32>>(&path), None);

        fs::write(&path, b"[1,").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&path), None);
    }

    #[test]
    fn removing_twice_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.json");
        save_json(&path, "x").unwrap();
        remove(&path).unwrap();
        remove(&path).unwrap();
        assert!(!path.exists());
    }
}
