// src/scan.rs

//! Tree Scanner: the snapshot taken before the build starts.
//!
//! Walks the tree once, post-order. Regular files become `Untouched` entries
//! in the [`PathRegistry`]; every directory (root included) gets exactly one
//! watch, installed only after all of its children have been visited so the
//! scanner's own directory opens are not reported back to us. Symlinks,
//! devices, sockets and fifos are skipped.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::{ReducerError, Result};
use crate::registry::PathRegistry;
use crate::watch::{WatchBackend, WatchTable};

/// What the scan found.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub directories: usize,
    pub skipped: usize,
}

/// Snapshot `root` into `registry` and install a watch per directory.
///
/// Any failure aborts the scan; there is no partial snapshot.
pub fn scan_tree<B: WatchBackend>(
    root: &Path,
    backend: &mut B,
    registry: &mut PathRegistry,
    watches: &mut WatchTable<B::Handle>,
) -> Result<ScanSummary> {
    let mut summary = ScanSummary::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .contents_first(true);

    for entry in walker {
        let entry = entry.map_err(|source| ReducerError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        let rel = relative_to(root, entry.path())?;
        let file_type = entry.file_type();

        if file_type.is_file() {
            registry.register_existing(rel)?;
            summary.files += 1;
        } else if file_type.is_dir() {
            install_watch(backend, watches, entry.path(), rel)?;
            summary.directories += 1;
        } else {
            trace!(path = %rel.display(), "skipping non-regular entry");
            summary.skipped += 1;
        }
    }

    debug!(?summary, watches = watches.len(), "tree scan finished");
    Ok(summary)
}

fn install_watch<B: WatchBackend>(
    backend: &mut B,
    watches: &mut WatchTable<B::Handle>,
    abs: &Path,
    rel: PathBuf,
) -> Result<()> {
    match backend.add_watch(abs) {
        Ok(handle) => {
            trace!(dir = %rel.display(), ?handle, "watching directory");
            watches.insert(handle, rel)
        }
        Err(err) if err.raw_os_error() == Some(libc::ENOSPC) => Err(ReducerError::WatchLimit {
            path: abs.to_path_buf(),
            installed: watches.len(),
        }),
        Err(source) => Err(ReducerError::WatchFailed {
            path: abs.to_path_buf(),
            source,
        }),
    }
}

/// Root-relative form of `path`; the root itself maps to the empty path.
fn relative_to(root: &Path, path: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            ReducerError::Other(anyhow!(
                "walked path '{}' is outside root '{}'",
                path.display(),
                root.display()
            ))
        })
}
