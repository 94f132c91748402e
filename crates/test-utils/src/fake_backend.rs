use std::io;
use std::path::{Path, PathBuf};

use lk_reducer::watch::WatchBackend;

/// A fake watch backend that:
/// - hands out sequential `u32` handles starting at 1
/// - records every directory it was asked to watch, in call order
/// - can simulate the kernel watch ceiling, a handle handed out twice, or
///   a refused watch on one directory.
#[derive(Debug, Default)]
pub struct FakeWatchBackend {
    next: u32,
    added: Vec<PathBuf>,
    limit: Option<usize>,
    repeat_handles: bool,
    refuse: Option<String>,
}

impl FakeWatchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `ENOSPC` once `limit` watches are installed.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return the same handle for every directory.
    pub fn with_repeated_handles(mut self) -> Self {
        self.repeat_handles = true;
        self
    }

    /// Fail with `EACCES` for directories whose name is `name`.
    pub fn refusing(mut self, name: &str) -> Self {
        self.refuse = Some(name.to_string());
        self
    }

    /// Directories watched so far, in the order they were added.
    pub fn added(&self) -> &[PathBuf] {
        &self.added
    }
}

impl WatchBackend for FakeWatchBackend {
    type Handle = u32;

    fn add_watch(&mut self, dir: &Path) -> io::Result<u32> {
        if let Some(limit) = self.limit {
            if self.added.len() >= limit {
                return Err(io::Error::from_raw_os_error(libc::ENOSPC));
            }
        }
        if let Some(ref name) = self.refuse {
            if dir.file_name().and_then(|n| n.to_str()) == Some(name.as_str()) {
                return Err(io::Error::from_raw_os_error(libc::EACCES));
            }
        }

        self.added.push(dir.to_path_buf());
        if !self.repeat_handles {
            self.next += 1;
        } else if self.next == 0 {
            self.next = 1;
        }
        Ok(self.next)
    }
}
