// src/config/validate.rs

use std::path::{Path, PathBuf};

use crate::errors::{ReducerError, Result};

/// Check that `target` is an existing directory and return its canonical
/// form, which becomes the root every tracked path is relative to.
pub fn validate_root(target: &Path) -> Result<PathBuf> {
    let root = target.canonicalize().map_err(|err| {
        ReducerError::Config(format!(
            "target directory '{}' is not accessible: {err}",
            target.display()
        ))
    })?;

    if !root.is_dir() {
        return Err(ReducerError::Config(format!(
            "target '{}' is not a directory",
            target.display()
        )));
    }

    Ok(root)
}
