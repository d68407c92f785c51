//! Greedy word-wrapping layout engine.
//!
//! # Scope
//!
//! This crate turns a [`minnow_dom::DomTree`] into a flat list of
//! positioned line boxes fitted to a fixed wrap width:
//!
//! - **Word metrics cache** - memoizes the pixel size of every distinct
//!   word as reported by a text-measurement backend.
//! - **Line box** - one visually wrapped line: fixed origin, accumulated
//!   width/height, the words it holds, and a visibility flag.
//! - **Layout engine** - walks the document tree, measures words through
//!   the cache, packs them greedily into line boxes, computes content
//!   bounds, and culls boxes against a viewport.
//!
//! Layout is single-threaded and synchronous; a pass always recomputes
//! from scratch (no incremental re-layout). The metrics cache is the only
//! shared state and is handed to each engine behind a mutex.

pub mod engine;
pub mod geometry;
pub mod line_box;
pub mod metrics;

pub use engine::{Layout, PARAGRAPH_BREAK_PADDING};
pub use geometry::{Rect, View};
pub use line_box::LineBox;
pub use metrics::{
    ApproximateTextMeasurer, SPACE, SharedMetricsCache, TextMeasurer, WordMetricsCache,
};
