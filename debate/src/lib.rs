#![deny(missing_docs)]
//! # debate — multi-agent debate engine
//!
//! A single import surface over the `debate-*` crates: the protocol
//! traits, the role-specialized agent, the tool registry and prompt
//! resolver, the state stores, the tracing hooks, and the round-based
//! orchestrator. Re-exports sit behind feature flags so a caller who
//! only needs, say, the protocol traits to implement a capability
//! doesn't pull in the scheduler.
//!
//! `config` additionally exposes [`DebateConfigDocument`], the typed
//! shape of an already-parsed `./debate-config.json` — this crate
//! never reads the filesystem or `argv` itself.

#[cfg(feature = "config")]
mod config;
#[cfg(feature = "config")]
mod trace_env;

#[cfg(feature = "core")]
pub use debate_agent;
#[cfg(feature = "core")]
pub use debate_context;
#[cfg(feature = "core")]
pub use debate_orchestrator;
#[cfg(feature = "core")]
pub use debate_prompt;
#[cfg(feature = "core")]
pub use debate_protocol;
#[cfg(feature = "core")]
pub use debate_state;
#[cfg(feature = "core")]
pub use debate_tool;
#[cfg(feature = "hooks")]
pub use debate_hooks;

#[cfg(feature = "config")]
pub use config::{default_agents, default_judge, DebateConfigDocument};
#[cfg(feature = "config")]
pub use trace_env::{resolve_trace_env, LangfuseCredentials};

/// Happy-path imports for wiring up a debate.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use debate_protocol::{
        Agent, AgentClarifications, AgentConfig, AgentId, Capability, Contribution,
        ContributionKind, DebateConfig, DebateContext, DebateError, DebateId, DebateState,
        DebateStatus, DebateStore, ExecutionResult, FinalSolution, JudgeAgent, PreparedContext,
        ProviderError, Role, Round, SummarizationConfig, TraceBackend,
    };

    #[cfg(feature = "core")]
    pub use debate_agent::DebateAgent;

    #[cfg(feature = "core")]
    pub use debate_tool::ToolRegistry;

    #[cfg(feature = "core")]
    pub use debate_orchestrator::DebateOrchestrator;

    #[cfg(feature = "core")]
    pub use debate_state::{generate_debate_id, FsDebateStore, MemoryDebateStore};

    #[cfg(feature = "hooks")]
    pub use debate_hooks::{HookRegistry, TracingHook};

    #[cfg(feature = "config")]
    pub use crate::{resolve_trace_env, DebateConfigDocument, LangfuseCredentials};
}
