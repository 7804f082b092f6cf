//! Bookmark store
//!
//! On disk the store is a JSON object: `{ "<url>": "<title>", ... }`.
//! Keys keep their insertion order so the bookmark bar is stable across restarts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
}

/// Bookmarks keyed by URL, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct BookmarkMap(Vec<Bookmark>);

impl BookmarkMap {
    /// Insert or overwrite. Returns true when the URL was not present yet.
    fn upsert(&mut self, url: String, title: String) -> bool {
        if let Some(existing) = self.0.iter_mut().find(|b| b.url == url) {
            existing.title = title;
            false
        } else {
            self.0.push(Bookmark { url, title });
            true
        }
    }
}

impl BookmarkMap {
    /// Parse the on-disk object. Duplicate URLs keep their first position
    /// and take the last title.
    fn from_json(contents: &str) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(contents)?;

        let mut map = BookmarkMap::default();
        for (url, title) in object {
            let title: String = serde_json::from_value(title)?;
            map.upsert(url, title);
        }
        Ok(map)
    }

    fn to_json(&self) -> Result<String> {
        let object: Map<String, Value> = self
            .0
            .iter()
            .map(|b| (b.url.clone(), Value::String(b.title.clone())))
            .collect();
        Ok(serde_json::to_string(&object)?)
    }
}

/// File-backed bookmark collection
pub struct BookmarkStore {
    path: PathBuf,
    bookmarks: BookmarkMap,
}

impl BookmarkStore {
    /// Load the store from `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let bookmarks = match fs::read_to_string(&path) {
            Ok(contents) => BookmarkMap::from_json(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No bookmark file, starting empty");
                BookmarkMap::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            count = bookmarks.0.len(),
            "Loaded bookmarks"
        );

        Ok(Self { path, bookmarks })
    }

    /// Upsert a bookmark and rewrite the file.
    ///
    /// The in-memory entry is kept even when the write fails.
    pub fn add(&mut self, url: impl Into<String>, title: impl Into<String>) -> Result<()> {
        let url = url.into();
        let created = self.bookmarks.upsert(url.clone(), title.into());

        tracing::info!(url = %url, created, "Bookmark stored");

        self.save()
    }

    /// Write the whole store to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = self.bookmarks.to_json()?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks.0
    }

    pub fn title_for(&self, url: &str) -> Option<&str> {
        self.bookmarks
            .0
            .iter()
            .find(|b| b.url == url)
            .map(|b| b.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.bookmarks.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.0.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
