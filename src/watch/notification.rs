// src/watch/notification.rs

use std::ffi::OsString;

use crate::types::NotificationKind;

/// One kernel record, detached from the read buffer it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification<H> {
    /// Watch the record was delivered on.
    pub handle: H,
    pub kind: NotificationKind,
    /// Bare name of the child entry; `None` when the record concerns the
    /// watched directory itself.
    pub name: Option<OsString>,
    /// Set when the kernel flagged lost events (`IN_Q_OVERFLOW`).
    pub overflow: bool,
}

impl<H> Notification<H> {
    pub fn new(handle: H, kind: NotificationKind, name: impl Into<OsString>) -> Self {
        Self {
            handle,
            kind,
            name: Some(name.into()),
            overflow: false,
        }
    }

    /// A record about the watched directory itself (no child name).
    pub fn on_directory(handle: H, kind: NotificationKind) -> Self {
        Self {
            handle,
            kind,
            name: None,
            overflow: false,
        }
    }

    pub fn overflow(handle: H) -> Self {
        Self {
            handle,
            kind: NotificationKind::Other,
            name: None,
            overflow: true,
        }
    }
}
