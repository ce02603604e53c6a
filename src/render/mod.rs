//! Rendering helpers for inspecting story forests.
//!
//! These produce JSON and readable outlines; the target application's own
//! record markup is produced elsewhere.

mod cleanup;
mod json;
mod options;
mod text;
pub mod visitor;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, to_ndjson, JsonFormat};
pub use options::RenderOptions;
pub use text::{to_text, to_text_with_visitor};
pub use visitor::{walk, CompositeVisitor, DefaultVisitor, DocumentVisitor, SkipLockedVisitor, Visited, VisitorAction};
