//! File-backed bookmark list.
//!
//! Bookmarks are Serper places keyed by `cid`, kept sorted by `cid` and
//! persisted as a JSON array after every change. A missing or unreadable
//! file loads as an empty list.
//!
//! Toggling the same place twice yields the list it started from.

use std::path::{Path, PathBuf};

use placehub_types::{Bookmark, Cid};
use tracing::debug;

use crate::persist::{self, PersistError};

/// File name used when the caller does not pick one.
pub const DEFAULT_BOOKMARKS_FILE: &str = "placehub-bookmarks.json";

/// Errors raised while persisting bookmarks.
pub type BookmarkError = PersistError;

/// Bookmarks persisted in a JSON file.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Load the bookmarks stored at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bookmarks = load(&path);
        debug!(path = %path.display(), count = bookmarks.len(), "bookmarks loaded");
        Self { path, bookmarks }
    }

    /// File the bookmarks are persisted to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All bookmarks, ordered by `cid`.
    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Number of bookmarks.
    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    /// Whether there are no bookmarks.
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Whether a place with `cid` is bookmarked.
    pub fn is_bookmarked(&self, cid: &Cid) -> bool {
        self.position(cid).is_ok()
    }

    fn position(&self, cid: &Cid) -> Result<usize, usize> {
        self.bookmarks.binary_search_by(|b| b.cid.cmp(cid))
    }

    /// Bookmark `place`. Returns `false` when it was already bookmarked.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError`] if the file cannot be written.
    pub fn add(&mut self, place: Bookmark) -> Result<bool, BookmarkError> {
        let Err(index) = self.position(&place.cid) else {
            return Ok(false);
        };
        let mut next = self.bookmarks.clone();
        next.insert(index, place);
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the bookmark with `cid`. Returns `false` when there was none.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError`] if the file cannot be written.
    pub fn remove(&mut self, cid: &Cid) -> Result<bool, BookmarkError> {
        let Ok(index) = self.position(cid) else {
            return Ok(false);
        };
        let mut next = self.bookmarks.clone();
        next.remove(index);
        self.commit(next)?;
        Ok(true)
    }

    /// Add `place` if absent, remove it otherwise. Returns whether it is
    /// bookmarked afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError`] if the file cannot be written.
    pub fn toggle(&mut self, place: Bookmark) -> Result<bool, BookmarkError> {
        if self.is_bookmarked(&place.cid) {
            self.remove(&place.cid)?;
            Ok(false)
        } else {
            self.add(place)?;
            Ok(true)
        }
    }

    /// Remove every bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError`] if the file cannot be written.
    pub fn clear(&mut self) -> Result<(), BookmarkError> {
        self.commit(Vec::new())
    }

    /// Persist `next` and adopt it. On a write failure the in-memory list
    /// is left as it was.
    fn commit(&mut self, next: Vec<Bookmark>) -> Result<(), BookmarkError> {
        persist::save_json(&self.path, &next)?;
        self.bookmarks = next;
        Ok(())
    }
}

fn load(path: &Path) -> Vec<Bookmark> {
    let mut bookmarks: Vec<Bookmark> = persist::load_json(path).unwrap_or_default();
    bookmarks.sort_by(|a, b| a.cid.cmp(&b.cid));
    bookmarks.dedup_by(|a, b| a.cid == b.cid);
    bookmarks
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    fn place(cid: &str) -> Bookmark {
        Bookmark {
            position: 1,
            title: format!("Place {cid}"),
            address: String::from("1 Main St"),
            latitude: 52.5,
            longitude: 13.4,
            rating: Some(4.2),
            rating_count: Some(10),
            category: None,
            phone_number: None,
            website: None,
            cid: Cid::new(cid),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::open(dir.path().join("none.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(BookmarkStore::open(&path).is_empty());
    }

    #[test]
    fn add_is_idempotent_per_cid() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BookmarkStore::open(dir.path().join("b.json"));
        assert!(store.add(place("1")).unwrap());
        assert!(!store.add(place("1")).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggling_twice_restores_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BookmarkStore::open(dir.path().join("b.json"));
        store.add(place("1")).unwrap();
        store.add(place("2")).unwrap();
        let before = store.list().to_vec();

        assert!(store.toggle(place("3")).unwrap());
        assert!(store.is_bookmarked(&Cid::new("3")));
        assert!(!store.toggle(place("3")).unwrap());
        assert_eq!(store.list(), before.as_slice());

        // Starting from a bookmarked place works the same way.
        assert!(!store.toggle(place("1")).unwrap());
        assert!(store.toggle(place("1")).unwrap());
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn failed_write_leaves_list_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();
        let mut store = BookmarkStore::open(blocker.join("b.json"));

        assert!(store.toggle(place("1")).is_err());
        assert!(!store.is_bookmarked(&Cid::new("1")));
        assert!(store.is_empty());
        assert!(store.add(place("2")).is_err());
        assert!(store.clear().is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn hand_edited_file_is_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.json");
        let places = vec![place("9"), place("4"), place("9")];
        fs::write(&path, serde_json::to_vec(&places).unwrap()).unwrap();

        let store = BookmarkStore::open(&path);
        let cids: Vec<&str> = store.list().iter().map(|b| b.cid.as_str()).collect();
        assert_eq!(cids, vec!["4", "9"]);
    }

    #[test]
    fn changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("b.json");

        let mut store = BookmarkStore::open(&path);
        store.add(place("1")).unwrap();
        store.add(place("2")).unwrap();
        store.remove(&Cid::new("1")).unwrap();

        let reopened = BookmarkStore::open(&path);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.list()[0].cid.as_str(), "2");

        let mut reopened = reopened;
        reopened.clear().unwrap();
        assert!(BookmarkStore::open(&path).is_empty());
    }

    #[test]
    fn removing_unknown_cid_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BookmarkStore::open(dir.path().join("b.json"));
        assert!(!store.remove(&Cid::new("ghost")).unwrap());
        assert!(!store.path().exists());
    }
}
