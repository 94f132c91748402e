// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `lk-reducer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lk-reducer",
    version,
    about = "Find out which files of a source tree a build reads, which it never touches, and which it generates.",
    long_about = "Snapshots the target directory, drops you into an interactive shell, \
                  and records filesystem activity until the shell exits. Build the project \
                  in that shell, then exit it. The verdict for every file is written to \
                  `lk-reducer.out` in the target directory:\n\n  \
                  A <path>  pre-existing file the build accessed\n  \
                  U <path>  pre-existing file the build never touched\n  \
                  G <path>  file or directory created during the build"
)]
pub struct CliArgs {
    /// Directory to operate in.
    ///
    /// Default: the current working directory.
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LK_REDUCER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
