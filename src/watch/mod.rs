// src/watch/mod.rs

//! Directory watching.
//!
//! This module is responsible for:
//! - Installing one inotify watch per directory ([`backend`]).
//! - Mapping watch handles back to directories ([`table`]).
//! - Turning raw kernel reads into owned [`Notification`]s ([`source`]).
//!
//! Individual files are never watched: the number of watches is bounded by
//! the directory count, and file activity is recovered from the child name
//! carried by each directory notification.

pub mod backend;
pub mod notification;
pub mod source;
pub mod table;

pub use backend::{InotifyBackend, WatchBackend, directory_watch_mask};
pub use notification::Notification;
pub use source::{Batch, InotifySource, NotificationSource};
pub use table::WatchTable;
