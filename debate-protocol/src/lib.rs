//! # debate-protocol — protocol traits for the debate engine
//!
//! This crate defines the boundaries every other `debate-*` crate
//! implements or consumes: the LLM Capability, the Tool Registry, the
//! Agent (and Judge) actor, the State Store, and the Tracing Hook
//! surface, plus the shared data model that crosses every boundary
//! (`DebateState`, `Contribution`, `Round`, ...).
//!
//! ## The protocols
//!
//! | Protocol | Trait | What it does |
//! |----------|-------|--------------|
//! | Capability | [`Capability`] | The narrow abstract `complete` operation |
//! | Tool | [`ToolDyn`] | A named, synchronous, JSON-in/JSON-out tool |
//! | Agent | [`Agent`], [`JudgeAgent`] | One role-specialized actor's fixed interface |
//! | State | [`DebateStore`] | How a debate's document persists across rounds |
//! | Hook | [`DebateHook`] | Best-effort observation of a run |
//!
//! ## Design principle
//!
//! Every protocol trait is operation-defined, not mechanism-defined:
//! `Agent::propose` means "produce this agent's initial position," not
//! "make an API call." A mock capability, a real provider adapter,
//! and a future streaming backend all satisfy the same trait.

#![deny(missing_docs)]

pub mod agent;
pub mod capability;
pub mod duration;
pub mod error;
pub mod hook;
pub mod id;
pub mod model;
pub mod role;
pub mod state;
pub mod tool;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use agent::{Agent, AgentTurnOutput, DebateContext, JudgeAgent, PreparedContext};
pub use capability::{
    Capability, CapabilityMessage, CapabilityRequest, CapabilityResponse, CapabilityToolSchema,
    ToolCallRequest, Usage,
};
pub use duration::DurationMs;
pub use error::{
    DebateError, FatalInternal, ProviderError, TimeoutError, ToolError, TracingError,
    ValidationError,
};
pub use hook::{AgentActivity, DebateHook, DebateHookEvent, Phase, ToolOutcome};
pub use id::{AgentId, ClarificationId, DebateId};
pub use model::{
    AgentClarifications, AgentConfig, ClarificationItem, Contribution, ContributionKind,
    ContributionMetadata, DebateConfig, DebateState, DebateStatus, ExecutionResult,
    FinalSolution, OrchestratorType, PromptSource, PromptSourceKind, Round, SummarizationConfig,
    Summary, SummaryMetadata, SuspendPayload, SuspendReason, SynthesisMethod,
    TerminationCondition, ToolCallRecord, ToolRef, TraceBackend,
};
pub use role::Role;
pub use state::{DebateStore, StoreError};
pub use tool::{error_envelope, success_envelope, ToolContext, ToolDyn, ToolSchema};
