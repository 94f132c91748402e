// src/exec/mod.rs

//! Subprocess collaborator.
//!
//! The build happens inside the operator's interactive shell, started with
//! `tokio::process::Command`. Its only contract with the rest of the tool is
//! its termination, delivered over a one-shot channel (see [`shell`]).

pub mod shell;

pub use shell::{ShellGuard, ShellSession, spawn_shell};
