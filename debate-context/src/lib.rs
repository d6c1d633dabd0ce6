#![deny(missing_docs)]
//! History formatting and summarization for the debate engine.
//!
//! [`format_history`]/[`previous_context`]/[`prepend_context`] produce
//! the "Previous Debate" section prepended to an agent's user prompt.
//! [`summarize`] drives the capability to compress that history into a
//! per-agent summary once it grows past a configured threshold.

mod formatter;
mod summarizer;

pub use formatter::{format_history, prepend_context, previous_context};
pub use summarizer::summarize;
