use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use lk_reducer::errors::Result;
use lk_reducer::watch::{Batch, NotificationSource};

/// A scripted notification source.
///
/// - `live` batches are handed out by `next_batch`, one per call; once they
///   run out, `next_batch` never completes (as a quiet inotify fd would).
/// - `try_next_batch` hands out whatever is left of `live`, then `queued`,
///   then reports the queue as empty.
#[derive(Debug, Default)]
pub struct FakeSource {
    live: VecDeque<Batch<u32>>,
    queued: VecDeque<Batch<u32>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch delivered while the shell is still running.
    pub fn live(mut self, batch: Batch<u32>) -> Self {
        self.live.push_back(batch);
        self
    }

    /// Batch only visible to the post-exit drain.
    pub fn queued(mut self, batch: Batch<u32>) -> Self {
        self.queued.push_back(batch);
        self
    }
}

impl NotificationSource for FakeSource {
    type Handle = u32;

    fn next_batch(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Batch<u32>>> + Send + '_>> {
        match self.live.pop_front() {
            Some(batch) => Box::pin(async move { Ok(batch) }),
            None => Box::pin(std::future::pending()),
        }
    }

    fn try_next_batch(&mut self) -> Result<Option<Batch<u32>>> {
        Ok(self.live.pop_front().or_else(|| self.queued.pop_front()))
    }
}
