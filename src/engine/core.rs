// src/engine/core.rs

//! Pure classification state machine.
//!
//! [`Classifier`] owns the Path Registry and the Watch Table once the scan is
//! over and advances per-path verdicts one notification at a time. It has no
//! Tokio types and performs no IO, so it can be driven directly from tests.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::errors::{ReducerError, Result};
use crate::registry::{PathRegistry, Transition};
use crate::types::NotificationKind;
use crate::watch::{Notification, WatchTable};

/// What a single notification did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a child event, not a kind we classify, or an open on a path we
    /// never saw being created.
    Ignored,
    Applied(Transition),
}

/// Counters kept while draining notifications.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectorStats {
    pub batches: usize,
    pub notifications: usize,
    pub accessed: usize,
    pub generated: usize,
    pub unchanged: usize,
    pub ignored: usize,
}

#[derive(Debug)]
pub struct Classifier<H> {
    registry: PathRegistry,
    watches: WatchTable<H>,
    stats: CollectorStats,
}

impl<H> Classifier<H>
where
    H: Eq + Hash + Debug,
{
    /// Take ownership of the snapshot built by the scanner.
    pub fn new(registry: PathRegistry, watches: WatchTable<H>) -> Self {
        Self {
            registry,
            watches,
            stats: CollectorStats::default(),
        }
    }

    /// Apply one notification.
    ///
    /// Fatal on overflow records and on handles missing from the watch table.
    pub fn apply(&mut self, notification: &Notification<H>) -> Result<Outcome> {
        self.stats.notifications += 1;

        if notification.overflow {
            return Err(ReducerError::QueueOverflow);
        }

        let dir = self.watches.resolve(&notification.handle)?;

        let name = match notification.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(self.ignore()),
        };

        if notification.kind == NotificationKind::Other {
            return Ok(self.ignore());
        }

        let path = dir.join(name);

        let transition = match self.registry.mark_accessed(&path) {
            Some(transition) => transition,
            None if notification.kind.creates_entry() => {
                self.registry.register_generated(path.clone())
            }
            None => {
                trace!(path = %path.display(), "open on untracked path; ignoring");
                return Ok(self.ignore());
            }
        };

        match transition {
            Transition::Accessed => self.stats.accessed += 1,
            Transition::Generated => self.stats.generated += 1,
            Transition::Unchanged => self.stats.unchanged += 1,
        }
        trace!(path = %path.display(), kind = ?notification.kind, ?transition, "classified");

        Ok(Outcome::Applied(transition))
    }

    /// Apply every notification of one read, in delivery order.
    pub fn apply_batch(&mut self, batch: &[Notification<H>]) -> Result<()> {
        self.stats.batches += 1;
        for notification in batch {
            self.apply(notification)?;
        }
        Ok(())
    }

    pub fn registry(&self) -> &PathRegistry {
        &self.registry
    }

    pub fn watches(&self) -> &WatchTable<H> {
        &self.watches
    }

    pub fn stats(&self) -> CollectorStats {
        self.stats
    }

    /// Hand the final registry to the reporter.
    pub fn into_registry(self) -> PathRegistry {
        self.registry
    }

    fn ignore(&mut self) -> Outcome {
        self.stats.ignored += 1;
        Outcome::Ignored
    }
}
