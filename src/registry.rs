// src/registry.rs

//! Path Registry: root-relative path -> verdict.
//!
//! Entries are never removed. Pre-existing files enter through
//! [`PathRegistry::register_existing`] during the scan; paths born during the
//! build enter through [`PathRegistry::register_generated`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{ReducerError, Result};
use crate::types::Verdict;

/// Result of feeding one observed path into the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Untouched -> Accessed`.
    Accessed,
    /// New entry born as `Generated`.
    Generated,
    /// Path was already `Accessed` or `Generated`.
    Unchanged,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathRegistry {
    entries: BTreeMap<PathBuf, Verdict>,
}

/// Number of entries per verdict.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VerdictCounts {
    pub untouched: usize,
    pub accessed: usize,
    pub generated: usize,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file that existed before the build as `Untouched`.
    ///
    /// A second registration of the same path means the tree changed under
    /// the scanner and is fatal.
    pub fn register_existing(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return Err(ReducerError::DuplicatePath(path));
        }
        self.entries.insert(path, Verdict::Untouched);
        Ok(())
    }

    /// Record an open/create/move-in on a known path.
    ///
    /// Returns `None` if the path is not tracked.
    pub fn mark_accessed(&mut self, path: &Path) -> Option<Transition> {
        let verdict = self.entries.get_mut(path)?;
        match verdict {
            Verdict::Untouched => {
                *verdict = Verdict::Accessed;
                Some(Transition::Accessed)
            }
            Verdict::Accessed | Verdict::Generated => Some(Transition::Unchanged),
        }
    }

    /// Track a path created during the build.
    ///
    /// Only valid for paths absent from the registry; returns
    /// [`Transition::Unchanged`] and leaves the entry alone otherwise.
    pub fn register_generated(&mut self, path: impl Into<PathBuf>) -> Transition {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return Transition::Unchanged;
        }
        self.entries.insert(path, Verdict::Generated);
        Transition::Generated
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Verdict> {
        self.entries.get(path.as_ref()).copied()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Iterate every tracked path, ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, Verdict)> {
        self.entries.iter().map(|(p, v)| (p.as_path(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> VerdictCounts {
        let mut counts = VerdictCounts::default();
        for verdict in self.entries.values() {
            match verdict {
                Verdict::Untouched => counts.untouched += 1,
                Verdict::Accessed => counts.accessed += 1,
                Verdict::Generated => counts.generated += 1,
            }
        }
        counts
    }
}
