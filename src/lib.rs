// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod registry;
pub mod report;
pub mod scan;
pub mod types;
pub mod watch;

use std::fmt::Debug;
use std::hash::Hash;

use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::RunConfig;
use crate::engine::{Classifier, Collection, Collector};
use crate::errors::Result;
use crate::registry::PathRegistry;
use crate::report::write_report;
use crate::scan::scan_tree;
use crate::watch::{InotifyBackend, NotificationSource, WatchTable};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution
/// - the initial tree scan and watch installation
/// - the interactive build shell
/// - the event drain loop
/// - the report
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::resolve(&args)?;
    run_with_config(&cfg).await?;
    Ok(())
}

/// Run one observation cycle against an already resolved config.
///
/// Nothing is written unless every phase succeeds.
pub async fn run_with_config(cfg: &RunConfig) -> Result<Collection> {
    info!(root = %cfg.root.display(), "scanning tree");

    let mut backend = InotifyBackend::init()?;
    let mut registry = PathRegistry::new();
    let mut watches = WatchTable::new();
    let summary = scan_tree(&cfg.root, &mut backend, &mut registry, &mut watches)?;
    info!(
        files = summary.files,
        directories = summary.directories,
        skipped = summary.skipped,
        "initial scan complete"
    );

    let source = backend.into_source(cfg.event_buffer_size)?;

    ignore_interrupts()?;

    observe_build(cfg, Classifier::new(registry, watches), source).await
}

/// Hand the operator a shell, collect notifications until it exits, and
/// write the report.
///
/// On any collection error the shell is killed and no report is written.
pub async fn observe_build<S>(
    cfg: &RunConfig,
    classifier: Classifier<S::Handle>,
    source: S,
) -> Result<Collection>
where
    S: NotificationSource,
    S::Handle: Eq + Hash + Debug,
{
    let collector = Collector::new(classifier, source);

    println!("dropping you into an interactive shell now. compile the project, then exit the shell.");
    let mut session = exec::spawn_shell(&cfg.shell, &cfg.root)?;

    let collection = match collector.run(session.exit).await {
        Ok(collection) => collection,
        Err(err) => {
            session.guard.kill();
            return Err(err);
        }
    };
    if !collection.shell_status.success() {
        warn!(status = %collection.shell_status, "shell exited unsuccessfully");
    }

    println!(
        "event collection phase is over, dumping results to \"{}\"...",
        cfg.report_path.display()
    );
    write_report(&collection.registry, &cfg.report_path)?;

    let counts = collection.registry.counts();
    info!(
        accessed = counts.accessed,
        untouched = counts.untouched,
        generated = counts.generated,
        report = %cfg.report_path.display(),
        "report written"
    );

    Ok(collection)
}

/// Keep Ctrl-C from killing us while the operator works in the shell.
///
/// The terminal delivers SIGINT to the whole foreground group; the shell
/// deals with it, and we keep collecting until the shell exits.
fn ignore_interrupts() -> Result<()> {
    let mut interrupts = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        while interrupts.recv().await.is_some() {
            info!("interrupt received; exit the shell to finish collecting");
        }
    });
    Ok(())
}
