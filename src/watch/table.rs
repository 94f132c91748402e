// src/watch/table.rs

//! Watch Table: watch handle -> watched directory (root-relative).
//!
//! Notifications carry only the handle of the watched directory and the bare
//! name of the child, so this reverse mapping is what turns a notification
//! back into a path.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use crate::errors::{ReducerError, Result};

#[derive(Debug, Clone)]
pub struct WatchTable<H> {
    by_handle: HashMap<H, PathBuf>,
    dirs: HashSet<PathBuf>,
}

impl<H> Default for WatchTable<H> {
    fn default() -> Self {
        Self {
            by_handle: HashMap::new(),
            dirs: HashSet::new(),
        }
    }
}

impl<H> WatchTable<H>
where
    H: Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dir` is watched under `handle`.
    ///
    /// Fails if the kernel hands out a handle that is already in use, or if
    /// `dir` is already watched. Either way every directory keeps exactly
    /// one watch.
    pub fn insert(&mut self, handle: H, dir: impl Into<PathBuf>) -> Result<()> {
        let dir = dir.into();
        if let Some(existing) = self.by_handle.get(&handle) {
            return Err(ReducerError::DuplicateWatch {
                path: dir,
                existing: existing.clone(),
            });
        }
        if self.dirs.contains(&dir) {
            return Err(ReducerError::DuplicateWatch {
                existing: dir.clone(),
                path: dir,
            });
        }
        self.dirs.insert(dir.clone());
        self.by_handle.insert(handle, dir);
        Ok(())
    }

    /// Directory watched under `handle`.
    pub fn resolve(&self, handle: &H) -> Result<&Path> {
        self.by_handle
            .get(handle)
            .map(PathBuf::as_path)
            .ok_or_else(|| ReducerError::UnknownWatch(format!("{handle:?}")))
    }

    pub fn is_watched(&self, dir: impl AsRef<Path>) -> bool {
        self.dirs.contains(dir.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }

    /// Watched directories, in no particular order.
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.by_handle.values().map(PathBuf::as_path)
    }
}
