// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::model::{DEFAULT_EVENT_BUFFER_SIZE, FALLBACK_SHELL, RunConfig};
use crate::config::validate::validate_root;
use crate::errors::Result;
use crate::report::REPORT_FILE_NAME;

/// Resolve a [`RunConfig`] from parsed CLI arguments and the environment.
///
/// - Target directory: positional argument, else the current directory.
/// - Shell: `$SHELL`, else `/bin/sh`.
pub fn resolve(args: &CliArgs) -> Result<RunConfig> {
    let target = args.target.clone().unwrap_or_else(default_target);
    resolve_with_shell(&target, std::env::var("SHELL").ok())
}

/// Same as [`resolve`], with the shell given explicitly instead of read from
/// the environment.
pub fn resolve_with_shell(target: &Path, shell: Option<String>) -> Result<RunConfig> {
    let root = validate_root(target)?;
    let shell = shell
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_SHELL.to_string());
    let report_path = root.join(REPORT_FILE_NAME);

    Ok(RunConfig {
        root,
        shell,
        report_path,
        event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
    })
}

pub fn default_target() -> PathBuf {
    PathBuf::from(".")
}
