// src/watch/backend.rs

//! Pluggable watch backend abstraction.
//!
//! The scanner installs directory watches through a `WatchBackend` rather
//! than talking to inotify directly. Production code uses
//! [`InotifyBackend`]; tests provide a fake that hands out scripted handles
//! and can simulate the kernel's watch ceiling.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::io;
use std::path::Path;

use inotify::{Inotify, WatchDescriptor, WatchMask};
use tracing::trace;

use super::source::InotifySource;

/// Trait abstracting how directory watches are installed.
pub trait WatchBackend {
    /// Opaque handle the backend assigns to each watch.
    type Handle: Eq + Hash + Clone + Debug;

    /// Subscribe to open/create/move-in notifications for children of `dir`.
    ///
    /// `dir` is an absolute (or cwd-relative) path to a directory. An error
    /// whose raw OS code is `ENOSPC` means the watch ceiling was hit.
    fn add_watch(&mut self, dir: &Path) -> io::Result<Self::Handle>;
}

/// Events every directory watch subscribes to.
///
/// `EXCL_UNLINK` suppresses events for children already unlinked, `ONLYDIR`
/// and `DONT_FOLLOW` make sure a path swapped for a file or symlink after the
/// scan is refused instead of silently watched.
pub fn directory_watch_mask() -> WatchMask {
    WatchMask::OPEN
        | WatchMask::CREATE
        | WatchMask::MOVED_TO
        | WatchMask::EXCL_UNLINK
        | WatchMask::ONLYDIR
        | WatchMask::DONT_FOLLOW
}

/// inotify-backed watch backend used in production.
pub struct InotifyBackend {
    inotify: Inotify,
}

impl fmt::Debug for InotifyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InotifyBackend").finish_non_exhaustive()
    }
}

impl InotifyBackend {
    /// Open a non-blocking, close-on-exec inotify instance.
    pub fn init() -> io::Result<Self> {
        let inotify = Inotify::init()?;
        Ok(Self { inotify })
    }

    /// Stop installing watches and start consuming notifications.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn into_source(self, buffer_size: usize) -> io::Result<InotifySource> {
        InotifySource::new(self.inotify, buffer_size)
    }
}

impl WatchBackend for InotifyBackend {
    type Handle = WatchDescriptor;

    fn add_watch(&mut self, dir: &Path) -> io::Result<WatchDescriptor> {
        let wd = self.inotify.watches().add(dir, directory_watch_mask())?;
        trace!(dir = %dir.display(), ?wd, "inotify watch added");
        Ok(wd)
    }
}
