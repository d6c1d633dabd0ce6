#![deny(missing_docs)]
//! The Orchestrator: round-based fan-out/fan-in scheduling of the
//! propose/critique/refine/summarize/synthesize phase sequence,
//! and the state-machine variant's suspend/resume clarification step.
//!
//! Dispatches each phase's per-agent work via `tokio::spawn`, joining
//! handles in deterministic order so persisted contribution order
//! never depends on which agent's capability call happens to return
//! first.

mod clarify;
mod orchestrator;
mod retry;

pub use orchestrator::DebateOrchestrator;
