// tests/shell_session.rs

mod common;

use std::fs;
use std::future::Future;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use lk_reducer::config::{RunConfig, resolve_with_shell};
use lk_reducer::engine::Classifier;
use lk_reducer::errors::{ReducerError, Result};
use lk_reducer::exec::spawn_shell;
use lk_reducer::watch::{Batch, Notification, NotificationSource};
use lk_reducer::report::REPORT_FILE_NAME;
use lk_reducer_test_utils::builders::{TreeBuilder, canonical_root};

use crate::common::{init_tracing, sample_snapshot, with_timeout};

#[tokio::test]
async fn test_shell_exit_is_signalled() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().build();

        let session = spawn_shell("true", dir.path()).unwrap();
        let status = session.exit.await.unwrap().unwrap();

        assert!(status.success());
        assert!(session.pid.is_some());
    })
    .await
}

#[tokio::test]
async fn test_shell_exit_code_is_preserved() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().build();

        let session = spawn_shell("false", dir.path()).unwrap();
        let status = session.exit.await.unwrap().unwrap();

        assert_eq!(status.code(), Some(1));
    })
    .await
}

#[tokio::test]
async fn test_missing_shell_is_reported() {
    init_tracing();
    let dir = TreeBuilder::new().build();

    match spawn_shell("/nonexistent/lk-reducer-shell", dir.path()) {
        Err(ReducerError::ShellSpawn { shell, .. }) => {
            assert_eq!(shell, "/nonexistent/lk-reducer-shell")
        }
        other => panic!("Expected ShellSpawn error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_full_run_writes_report() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().file("README.md").file("src/lib.c").build();
        let cfg: RunConfig = resolve_with_shell(dir.path(), Some("true".to_string())).unwrap();

        let collection = lk_reducer::run_with_config(&cfg).await.unwrap();

        assert!(collection.shell_status.success());
        let report = std::fs::read_to_string(canonical_root(&dir).join(REPORT_FILE_NAME)).unwrap();
        assert_eq!(report, "U README.md\nU src/lib.c\n");
    })
    .await
}

/// Reports a queue overflow once `pid_file` shows up, i.e. once the shell
/// is known to be running.
struct OverflowOnceShellRuns {
    pid_file: PathBuf,
}

impl NotificationSource for OverflowOnceShellRuns {
    type Handle = u32;

    fn next_batch(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Batch<u32>>> + Send + '_>> {
        Box::pin(async move {
            while !pid_written(&self.pid_file) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Ok(vec![Notification::overflow(1)])
        })
    }

    fn try_next_batch(&mut self) -> Result<Option<Batch<u32>>> {
        Ok(None)
    }
}

fn pid_written(pid_file: &std::path::Path) -> bool {
    fs::read_to_string(pid_file).is_ok_and(|s| s.ends_with('\n'))
}

fn process_alive(pid: libc::pid_t) -> bool {
    // Signal 0 only checks that the pid exists; the watcher task reaps it.
    unsafe { libc::kill(pid, 0) == 0 }
}

#[tokio::test]
async fn test_collection_error_kills_shell_and_skips_report() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().file("README.md").build();
        let scratch = tempfile::TempDir::new().unwrap();
        let pid_file = scratch.path().join("shell.pid");
        let script = scratch.path().join("shell.sh");
        fs::write(
            &script,
            format!("#!/bin/sh\necho $$ > '{}'\nexec sleep 30\n", pid_file.display()),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let cfg = resolve_with_shell(dir.path(), Some(script.display().to_string())).unwrap();
        let (registry, watches) = sample_snapshot();
        let source = OverflowOnceShellRuns {
            pid_file: pid_file.clone(),
        };

        let result = lk_reducer::observe_build(&cfg, Classifier::new(registry, watches), source).await;
        match result {
            Err(ReducerError::QueueOverflow) => {}
            other => panic!("Expected QueueOverflow error, got: {:?}", other),
        }
        assert!(!cfg.report_path.exists());

        let pid: libc::pid_t = fs::read_to_string(&pid_file).unwrap().trim().parse().unwrap();
        let mut waited = Duration::ZERO;
        while process_alive(pid) && waited < Duration::from_secs(5) {
            tokio::time::sleep(Duration::from_millis(20)).await;
            waited += Duration::from_millis(20);
        }
        assert!(!process_alive(pid), "shell {pid} outlived the failed collection");
    })
    .await
}
