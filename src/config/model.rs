// src/config/model.rs

use std::path::PathBuf;

/// Default size of the inotify read buffer; grown on demand.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 16 * 1024;

/// Shell used when `$SHELL` is unset or empty.
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Fully resolved settings for one run.
///
/// Built by [`crate::config::loader::resolve`]; every field has already been
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Canonical path of the tree to observe.
    pub root: PathBuf,
    /// Program started as the interactive build shell.
    pub shell: String,
    /// Where the verdict report is written.
    pub report_path: PathBuf,
    /// Initial inotify read buffer size in bytes.
    pub event_buffer_size: usize,
}
