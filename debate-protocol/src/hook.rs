//! The Tracing Hooks protocol boundary: a best-effort observer
//! surface emitting one event per phase boundary, agent method, LLM
//! call, and tool execution, matching the hook-emission order in
//! the orchestrator's contract.
//!
//! Hooks here are purely observational, unlike a gating hook that can
//! halt or rewrite a call — the spec's hook contract never mentions
//! intercepting or modifying debate flow, only observing it. A hook
//! that wants to affect the debate prints a warning and does nothing
//! else; hook failures are always logged and swallowed.

use async_trait::async_trait;

use crate::error::TracingError;
use crate::id::AgentId;

/// One of {propose, critique, refine, summarize, synthesize} within a
/// round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// All enabled agents propose concurrently.
    Propose,
    /// Agents critique each other's proposals concurrently.
    Critique,
    /// Agents refine their own proposals concurrently.
    Refine,
    /// Per-agent summarization at the top of rounds > 1.
    Summarize,
    /// The judge's single synthesis call at the end of the debate.
    Synthesize,
}

impl Phase {
    /// Lowercase name used in span names and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Propose => "propose",
            Phase::Critique => "critique",
            Phase::Refine => "refine",
            Phase::Summarize => "summarize",
            Phase::Synthesize => "synthesize",
        }
    }
}

/// A named activity an agent-method span covers, matching
/// `agent-<method>-<agentId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentActivity {
    /// `propose`.
    Propose,
    /// `critique`.
    Critique,
    /// `refine`.
    Refine,
    /// `prepareContext`.
    PrepareContext,
    /// `askClarifyingQuestions`.
    AskClarifyingQuestions,
    /// `synthesize` (judge only).
    Synthesize,
}

impl AgentActivity {
    /// The method-name fragment used in `agent-<method>-<agentId>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentActivity::Propose => "propose",
            AgentActivity::Critique => "critique",
            AgentActivity::Refine => "refine",
            AgentActivity::PrepareContext => "prepareContext",
            AgentActivity::AskClarifyingQuestions => "askClarifyingQuestions",
            AgentActivity::Synthesize => "synthesize",
        }
    }
}

/// One outcome of a tool execution, for the tool-span-ending contract
/// in §4.9: a success envelope ends with output, an error envelope
/// ends with level=error and the message, a non-JSON envelope ends
/// with the raw text.
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    /// A well-formed `{"status":"success",...}` envelope.
    Success {
        /// The envelope's `result` field, serialized.
        output: String,
    },
    /// A well-formed `{"status":"error",...}` envelope.
    Error {
        /// The envelope's `error` field.
        message: String,
    },
    /// The tool returned something that did not parse as an envelope.
    Malformed {
        /// The raw text returned.
        raw: String,
    },
}

/// Every event the orchestrator emits during a run, in the order
/// described by the orchestrator's hook contract. A `DebateHook`
/// observes these; it never controls debate flow.
#[derive(Debug, Clone)]
pub enum DebateHookEvent<'a> {
    /// A new round is starting.
    RoundStart {
        /// The round about to run.
        round: u32,
        /// Total rounds configured.
        total: u32,
    },
    /// A phase within the current round is starting.
    PhaseStart {
        /// The enclosing round.
        round: u32,
        /// Which phase.
        phase: Phase,
        /// How many tasks this phase will fan out.
        expected_count: usize,
    },
    /// One agent's turn within the current phase is starting.
    AgentStart {
        /// The agent whose turn this is.
        agent_id: &'a AgentId,
        /// Display name, for log/span readability.
        agent_name: &'a str,
        /// Which method is running.
        activity: AgentActivity,
    },
    /// One agent's turn within the current phase has finished.
    AgentComplete {
        /// The agent whose turn this was.
        agent_id: &'a AgentId,
        /// Display name.
        agent_name: &'a str,
        /// Which method ran.
        activity: AgentActivity,
    },
    /// A phase within the current round has finished.
    PhaseComplete {
        /// The enclosing round.
        round: u32,
        /// Which phase.
        phase: Phase,
    },
    /// Per-agent summarization is starting for this round.
    SummarizationStart {
        /// The agent being summarized for.
        agent_id: &'a AgentId,
    },
    /// A summary was produced.
    SummarizationComplete {
        /// The agent being summarized for.
        agent_id: &'a AgentId,
        /// Character count before truncation.
        before_chars: usize,
        /// Character count after truncation.
        after_chars: usize,
    },
    /// Summarization has finished for every participating agent this
    /// round.
    SummarizationEnd {
        /// The enclosing round.
        round: u32,
    },
    /// The judge's synthesis call is starting.
    SynthesisStart,
    /// The judge's synthesis call has finished.
    SynthesisComplete,
    /// A capability (LLM) call is starting, nested under the active
    /// per-agent span if one exists.
    LlmCallStart {
        /// The agent this call is attributed to, if any — the judge
        /// may call the capability without an active agent span.
        agent_id: Option<&'a AgentId>,
        /// Monotonic counter within the enclosing agent-method span,
        /// reset at each agent-method boundary.
        iteration: u32,
        /// Model identifier.
        model: &'a str,
    },
    /// A capability call has finished.
    LlmCallEnd {
        /// See [`DebateHookEvent::LlmCallStart`].
        agent_id: Option<&'a AgentId>,
        /// See [`DebateHookEvent::LlmCallStart`].
        iteration: u32,
        /// Input tokens reported, if any.
        input_tokens: Option<u32>,
        /// Output tokens reported, if any.
        output_tokens: Option<u32>,
    },
    /// A tool execution is starting, nested under the same per-agent
    /// span as the enclosing capability call.
    ToolExecutionStart {
        /// The agent whose turn invoked the tool.
        agent_id: &'a AgentId,
        /// The tool's registered name.
        tool_name: &'a str,
    },
    /// A tool execution has finished.
    ToolExecutionEnd {
        /// The agent whose turn invoked the tool.
        agent_id: &'a AgentId,
        /// The tool's registered name.
        tool_name: &'a str,
        /// How the span should be ended, per §4.9's contract.
        outcome: ToolOutcome,
    },
}

/// A best-effort observer of debate execution. Implementations MUST
/// NOT alter functional behavior: a failing hook is logged at warn
/// and swallowed by the dispatching registry, never surfaced to the
/// orchestrator's caller.
#[async_trait]
pub trait DebateHook: Send + Sync {
    /// Observe one event. Returning `Err` only affects this hook —
    /// the registry logs it and continues to the next hook and the
    /// orchestrator's own flow.
    async fn on_event(&self, event: &DebateHookEvent<'_>) -> Result<(), TracingError>;
}
