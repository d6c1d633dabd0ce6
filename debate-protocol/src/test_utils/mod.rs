//! Test doubles shared across `debate-*` crates. Available behind the
//! `test-utils` feature flag.

mod fixed_agent;
mod mock_capability;

pub use fixed_agent::FixedAgent;
pub use mock_capability::{MockCapability, ScriptedResponse};
