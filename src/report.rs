// src/report.rs

//! Plain-text verdict report.
//!
//! One line per tracked path: a tag, one space, the root-relative path.
//!
//! | tag | verdict   |
//! |-----|-----------|
//! | `A` | accessed  |
//! | `G` | generated |
//! | `U` | untouched |
//!
//! Lines are ordered by path. Path bytes that are not valid UTF-8 are written
//! lossily.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::errors::Result;
use crate::registry::PathRegistry;

/// Fixed name of the report, created in the target directory.
pub const REPORT_FILE_NAME: &str = "lk-reducer.out";

/// Write every entry of `registry` to `out`.
pub fn render_report<W: Write>(registry: &PathRegistry, mut out: W) -> std::io::Result<()> {
    for (path, verdict) in registry.iter() {
        writeln!(out, "{} {}", verdict.tag(), path.to_string_lossy())?;
    }
    out.flush()
}

/// Write the report to `path`.
///
/// The report is written next to its destination first and renamed into
/// place, so a failed run never leaves a truncated report behind.
pub fn write_report(registry: &PathRegistry, path: &Path) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let file = File::create(tmp)
        .with_context(|| format!("creating report file {:?}", tmp))?;
    render_report(registry, BufWriter::new(file))
        .with_context(|| format!("writing report file {:?}", tmp))?;
    fs::rename(tmp, path)
        .with_context(|| format!("moving report into place at {:?}", path))?;

    Ok(())
}
