// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is fatal: the tool is single-shot, and a partially observed
//! build is worse than no verdict at all, so nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReducerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to scan '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unable to add inotify watch for '{}': {source}", .path.display())]
    WatchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "inotify watch limit reached while watching '{}' ({installed} watches installed so far); \
         raise fs.inotify.max_user_watches (e.g. `sysctl fs.inotify.max_user_watches=<n>`) and retry",
        .path.display()
    )]
    WatchLimit { path: PathBuf, installed: usize },

    #[error(
        "file '{}' was registered twice during the initial scan; \
         the tree must not change while it is being scanned",
        .0.display()
    )]
    DuplicatePath(PathBuf),

    #[error(
        "the kernel reported the same watch for '{}' and '{}'; \
         the tree must not change while it is being scanned",
        .path.display(),
        .existing.display()
    )]
    DuplicateWatch { path: PathBuf, existing: PathBuf },

    #[error("notification for unknown watch handle {0}; classifier is out of sync with the watch set")]
    UnknownWatch(String),

    #[error("inotify queue overflow detected; some filesystem events were lost")]
    QueueOverflow,

    #[error("unable to start interactive shell '{shell}': {source}")]
    ShellSpawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ReducerError>;
