//! Shared fixtures for the lk-reducer integration tests.
//!
//! - [`builders`]: on-disk trees and notification constructors.
//! - [`fake_backend`]: a `WatchBackend` with scripted handles and failures.
//! - [`fake_source`]: a `NotificationSource` with scripted batches.

pub mod builders;
pub mod fake_backend;
pub mod fake_source;

use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// How long any single async test may run before it is considered hung.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Initialise tracing for tests, once per test binary.
///
/// Output goes through `with_test_writer()`, so it only shows up for failing
/// tests (or with `-- --nocapture`). Filter with `RUST_LOG`, e.g.
/// `RUST_LOG=lk_reducer=trace cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("lk_reducer=debug,warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Run a future, failing the test if it outlives [`TEST_TIMEOUT`].
///
/// The drain loop blocks on inotify readiness, so a bug there shows up as a
/// hang rather than an error.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("test timed out")
}
