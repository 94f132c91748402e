// src/watch/source.rs

//! Notification sources.
//!
//! A source yields notifications in batches, one batch per kernel read. A
//! single read may hold many variable-length records; the inotify crate walks
//! the fixed header plus name framing for us, and each record is copied out
//! into an owned [`Notification`] before the buffer is reused.

use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;

use inotify::{EventMask, Inotify, WatchDescriptor};
use tokio::io::unix::AsyncFd;
use tracing::debug;

use crate::errors::Result;
use crate::types::NotificationKind;

use super::notification::Notification;

/// Upper bound for the read buffer. One record is at most
/// `sizeof(inotify_event) + NAME_MAX + 1` bytes, so this is far beyond what a
/// single record can need.
const MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Batch of notifications parsed from one read.
pub type Batch<H> = Vec<Notification<H>>;

/// Trait abstracting where notifications come from.
///
/// Production code uses [`InotifySource`]; tests script batches instead.
pub trait NotificationSource: Send {
    type Handle: Send;

    /// Wait until notifications are available and return the next batch.
    ///
    /// Interrupted waits are retried internally.
    fn next_batch(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Batch<Self::Handle>>> + Send + '_>>;

    /// Return the next batch if one is already queued, without waiting.
    ///
    /// `Ok(None)` means the queue is empty.
    fn try_next_batch(&mut self) -> Result<Option<Batch<Self::Handle>>>;
}

/// inotify file descriptor registered with the Tokio reactor.
pub struct InotifySource {
    fd: AsyncFd<Inotify>,
    buffer: Vec<u8>,
}

impl fmt::Debug for InotifySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InotifySource")
            .field("buffer_len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl InotifySource {
    pub fn new(inotify: Inotify, buffer_size: usize) -> io::Result<Self> {
        let fd = AsyncFd::new(inotify)?;
        Ok(Self {
            fd,
            buffer: vec![0; buffer_size.max(1)],
        })
    }
}

impl NotificationSource for InotifySource {
    type Handle = WatchDescriptor;

    fn next_batch(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Batch<WatchDescriptor>>> + Send + '_>> {
        Box::pin(async move {
            loop {
                let mut guard = self.fd.readable_mut().await?;
                match guard.try_io(|inner| read_batch(inner.get_mut(), &mut self.buffer)) {
                    Ok(batch) => return Ok(batch?),
                    // Spurious readiness; the guard cleared it, wait again.
                    Err(_would_block) => continue,
                }
            }
        })
    }

    fn try_next_batch(&mut self) -> Result<Option<Batch<WatchDescriptor>>> {
        match read_batch(self.fd.get_mut(), &mut self.buffer) {
            Ok(batch) => Ok(Some(batch)),
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Read once from the inotify fd and copy every record out of the buffer.
///
/// Grows `buffer` when the kernel refuses the read because the next record
/// does not fit, and retries reads interrupted by a signal.
fn read_batch(
    inotify: &mut Inotify,
    buffer: &mut Vec<u8>,
) -> io::Result<Batch<WatchDescriptor>> {
    loop {
        let len = buffer.len();
        match inotify.read_events(buffer) {
            Ok(events) => {
                return Ok(events
                    .map(|event| Notification {
                        kind: kind_from_mask(event.mask),
                        overflow: event.mask.contains(EventMask::Q_OVERFLOW),
                        name: event.name.map(|name| name.to_os_string()),
                        handle: event.wd,
                    })
                    .collect());
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err)
                if err.kind() == io::ErrorKind::InvalidInput && len < MAX_BUFFER_SIZE =>
            {
                let grown = (len * 2).min(MAX_BUFFER_SIZE);
                debug!(from = len, to = grown, "growing inotify read buffer");
                buffer.resize(grown, 0);
            }
            Err(err) => return Err(err),
        }
    }
}

fn kind_from_mask(mask: EventMask) -> NotificationKind {
    if mask.contains(EventMask::CREATE) {
        NotificationKind::Created
    } else if mask.contains(EventMask::MOVED_TO) {
        NotificationKind::MovedIn
    } else if mask.contains(EventMask::OPEN) {
        NotificationKind::Opened
    } else {
        NotificationKind::Other
    }
}
