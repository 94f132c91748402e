// src/exec/shell.rs

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::{ReducerError, Result};

/// A running interactive shell.
///
/// `exit` fires exactly once, with the shell's exit status, when the shell
/// process terminates. Dropping `guard` while the shell is still running
/// kills it, so a fatal error anywhere in the caller takes the shell down.
#[derive(Debug)]
pub struct ShellSession {
    pub exit: oneshot::Receiver<io::Result<ExitStatus>>,
    pub pid: Option<u32>,
    pub guard: ShellGuard,
}

/// Kill switch for a running shell, fired on drop.
#[derive(Debug)]
pub struct ShellGuard {
    kill: Option<oneshot::Sender<()>>,
}

impl ShellGuard {
    /// Ask the watcher task to kill the shell now.
    pub fn kill(&mut self) {
        if let Some(tx) = self.kill.take() {
            // Closed once the shell has exited on its own.
            let _ = tx.send(());
        }
    }
}

impl Drop for ShellGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Start `shell` in `cwd` with inherited stdio and watch it from a
/// dedicated task.
///
/// The child is also spawned with `kill_on_drop`, so it dies with the
/// runtime if the watcher task is torn down before the shell exits.
pub fn spawn_shell(shell: &str, cwd: &Path) -> Result<ShellSession> {
    let mut cmd = Command::new(shell);
    cmd.current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| ReducerError::ShellSpawn {
        shell: shell.to_string(),
        source,
    })?;

    let pid = child.id();
    info!(%shell, ?pid, cwd = %cwd.display(), "interactive shell started");

    let (tx, rx) = oneshot::channel();
    let (kill_tx, kill_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let status = tokio::select! {
            biased;
            status = child.wait() => status,
            _ = kill_rx => {
                warn!(?pid, "terminating interactive shell");
                if let Err(err) = child.start_kill() {
                    warn!(error = %err, "failed to kill interactive shell");
                }
                child.wait().await
            }
        };
        debug!(?status, "shell process exited");
        // The collector may already be gone after a fatal error.
        let _ = tx.send(status);
    });

    Ok(ShellSession {
        exit: rx,
        pid,
        guard: ShellGuard { kill: Some(kill_tx) },
    })
}
