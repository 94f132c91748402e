#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use lk_reducer::types::NotificationKind;
use lk_reducer::watch::Notification;

/// Builder for an on-disk source tree in a fresh temporary directory.
pub struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Create a regular file (and any missing parent directories).
    pub fn file(self, rel: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, rel.as_bytes()).expect("Failed to write file");
        self
    }

    /// Create a directory (and any missing parents).
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("Failed to create dir");
        self
    }

    /// Create a symlink at `rel` pointing to `target`.
    pub fn symlink(self, target: &str, rel: &str) -> Self {
        let link = self.dir.path().join(rel);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::os::unix::fs::symlink(target, link).expect("Failed to create symlink");
        self
    }

    pub fn build(self) -> TempDir {
        self.dir
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical root of a built tree, as the scanner sees it.
pub fn canonical_root(dir: &TempDir) -> std::path::PathBuf {
    dir.path().canonicalize().expect("Failed to canonicalize temp dir")
}

pub fn opened(handle: u32, name: &str) -> Notification<u32> {
    Notification::new(handle, NotificationKind::Opened, name)
}

pub fn created(handle: u32, name: &str) -> Notification<u32> {
    Notification::new(handle, NotificationKind::Created, name)
}

pub fn moved_in(handle: u32, name: &str) -> Notification<u32> {
    Notification::new(handle, NotificationKind::MovedIn, name)
}

pub fn other(handle: u32, name: &str) -> Notification<u32> {
    Notification::new(handle, NotificationKind::Other, name)
}

/// Relative path as the report prints it.
pub fn rel(path: &str) -> &Path {
    Path::new(path)
}
