//! Line classification and reflow of zone-extracted text.
//!
//! Positional extraction yields flat lines with no structure. This module
//! rebuilds it in three stages: classify each line (heading, dash item,
//! drug entry, plain), split headings glued to body text by column-based
//! extraction, and fold the sequence into blocks, with headings and list
//! entries standalone and plain runs merged into paragraphs.

mod classify;
mod engine;
mod split;

pub use classify::{LineCategory, LineClassifier};
pub use engine::{OutputBlock, ReflowEngine};
pub use split::HeadingSplitter;

/// Reflow raw zone text with a fresh engine.
///
/// Convenience wrapper around [`ReflowEngine::reflow`]; callers reflowing
/// many blocks should hold one engine and reuse it.
pub fn reflow_text(text: &str) -> String {
    ReflowEngine::new().reflow(text)
}
