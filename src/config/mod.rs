// src/config/mod.rs

//! Run configuration for lk-reducer.
//!
//! Responsibilities:
//! - Define the resolved settings (`model.rs`).
//! - Resolve them from CLI arguments and environment (`loader.rs`).
//! - Validate the target directory (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{resolve, resolve_with_shell};
pub use model::RunConfig;
pub use validate::validate_root;
