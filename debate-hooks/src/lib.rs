#![deny(missing_docs)]
//! The Tracing Hooks observation surface: a [`HookRegistry`] that
//! dispatches [`debate_protocol::DebateHookEvent`]s to every
//! registered [`debate_protocol::DebateHook`], and [`TracingHook`],
//! the concrete `tracing`-span exporter of that contract.

mod registry;
mod tracing_hook;

pub use registry::HookRegistry;
pub use tracing_hook::TracingHook;
