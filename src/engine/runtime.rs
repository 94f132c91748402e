// src/engine/runtime.rs

use std::fmt;
use std::hash::Hash;
use std::io;
use std::process::ExitStatus;

use anyhow::anyhow;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::errors::{ReducerError, Result};
use crate::registry::PathRegistry;
use crate::watch::NotificationSource;

use super::core::{Classifier, CollectorStats};

/// Everything the reporter needs once collection is over.
#[derive(Debug)]
pub struct Collection {
    pub registry: PathRegistry,
    pub stats: CollectorStats,
    pub shell_status: ExitStatus,
}

/// Drains notifications into a [`Classifier`] while the build shell runs.
///
/// This is the async IO shell around the pure classifier: it waits on the
/// notification source and on the shell's exit signal, and feeds batches to
/// the classifier in delivery order.
pub struct Collector<S: NotificationSource> {
    classifier: Classifier<S::Handle>,
    source: S,
}

impl<S> fmt::Debug for Collector<S>
where
    S: NotificationSource,
    S::Handle: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("stats", &self.classifier.stats())
            .finish_non_exhaustive()
    }
}

impl<S> Collector<S>
where
    S: NotificationSource,
    S::Handle: Eq + Hash + fmt::Debug,
{
    pub fn new(classifier: Classifier<S::Handle>, source: S) -> Self {
        Self { classifier, source }
    }

    /// Main drain loop.
    ///
    /// - While the shell is alive, blocks until either a batch is readable
    ///   or `shell_exit` fires.
    /// - Once the shell is gone, drains whatever is already queued without
    ///   waiting, then stops.
    ///
    /// The source is dropped (closing the inotify fd) before returning.
    pub async fn run(
        mut self,
        mut shell_exit: oneshot::Receiver<io::Result<ExitStatus>>,
    ) -> Result<Collection> {
        info!("collecting filesystem events");

        let shell_status = loop {
            tokio::select! {
                biased;
                exit = &mut shell_exit => {
                    let status = exit.map_err(|_| {
                        ReducerError::Other(anyhow!(
                            "shell watcher stopped without reporting an exit status"
                        ))
                    })??;
                    break status;
                }
                batch = self.source.next_batch() => {
                    let batch = batch?;
                    debug!(len = batch.len(), "received notification batch");
                    self.classifier.apply_batch(&batch)?;
                }
            }
        };

        println!("processing remaining events...");
        info!(%shell_status, "shell exited; draining queued events");

        while let Some(batch) = self.source.try_next_batch()? {
            debug!(len = batch.len(), "draining queued batch");
            self.classifier.apply_batch(&batch)?;
        }

        let stats = self.classifier.stats();
        info!(
            batches = stats.batches,
            notifications = stats.notifications,
            accessed = stats.accessed,
            generated = stats.generated,
            ignored = stats.ignored,
            "event collection finished"
        );

        drop(self.source);

        Ok(Collection {
            registry: self.classifier.into_registry(),
            stats,
            shell_status,
        })
    }
}
