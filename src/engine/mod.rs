// src/engine/mod.rs

//! Event classification engine.
//!
//! The pure state machine lives in [`core`]; the async drain loop that feeds
//! it from a notification source until the build shell exits is implemented
//! in [`runtime`].

pub mod core;
pub mod runtime;

pub use core::{Classifier, CollectorStats, Outcome};
pub use runtime::{Collection, Collector};
