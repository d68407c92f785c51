//! Shared utilities for the minnow layout engine.
//!
//! Two concerns live here because every other crate needs at least one of
//! them: deduplicated warning output for non-fatal parse problems, and a
//! blocking HTTP fetch used by the document loader.

pub mod net;
pub mod warning;

pub use warning::{clear_warnings, warn_once};
