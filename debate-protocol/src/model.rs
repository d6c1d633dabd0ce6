//! The debate document's data model: everything persisted by the
//! state store and everything agents exchange within a round.

use crate::duration::DurationMs;
use crate::id::{AgentId, ClarificationId, DebateId};
pub use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static configuration for one agent: identity, generation settings,
/// optional prompt overrides, and its tool roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Stable identifier, unique within the roster.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// The role this agent argues from.
    pub role: Role,
    /// Model identifier passed to the capability.
    pub model: String,
    /// Provider identifier passed to the capability.
    pub provider: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Whether this agent participates in the debate at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path to an override system prompt, resolved relative to a
    /// config directory by the Prompt Resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_path: Option<String>,
    /// Path to an override summary prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_prompt_path: Option<String>,
    /// Path to an override clarification prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification_prompt_path: Option<String>,
    /// Per-agent summarization override; falls back to the debate's
    /// default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarization: Option<SummarizationConfig>,
    /// Names of tools this agent's registry should expose. Absent
    /// means no tools.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolRef>>,
}

fn default_true() -> bool {
    true
}

/// One entry in an [`AgentConfig::tools`] list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRef {
    /// The tool's registered name.
    pub name: String,
}

/// Controls whether and when an agent's history gets summarized
/// instead of carried verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationConfig {
    /// Whether summarization is active for this agent/debate.
    pub enabled: bool,
    /// Formatted-history character count above which a summary is
    /// produced instead of passing full history.
    pub threshold: usize,
    /// Maximum length, in characters, of a produced summary.
    pub max_length: usize,
    /// A free-form label recorded in [`SummaryMetadata::method`].
    pub method: String,
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 4000,
            max_length: 1000,
            method: "llm".to_string(),
        }
    }
}

/// How the orchestrator decides a debate is over. Only `rounds` is
/// implemented by the orchestrator in this engine; other values are
/// accepted and stored but treated as `rounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TerminationCondition {
    /// Run exactly `DebateConfig::rounds` rounds.
    Rounds,
    /// Run until the judge declares convergence (not implemented;
    /// treated as `Rounds`).
    Convergence,
}

/// How the judge produces the final solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SynthesisMethod {
    /// A single judge call over the full round history.
    Single,
    /// Iterative synthesis, refined across multiple judge calls (not
    /// implemented; treated as `Single`).
    Iterative,
}

/// Which orchestrator implementation runs the debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrchestratorType {
    /// No suspension; runs start-to-finish in one call.
    Classic,
    /// Suspends before round 1 when `interactiveClarifications` is set.
    StateMachine,
}

/// Which tracing backend to export spans to. The backend itself is
/// out of scope; this only selects whether export is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceBackend {
    /// No export; spans are still emitted via `tracing` but nothing
    /// reads the environment for export credentials.
    None,
    /// Export via Langfuse; requires `LANGFUSE_SECRET_KEY`/`LANGFUSE_PUBLIC_KEY`.
    Langfuse,
}

/// Debate-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Number of rounds to run. Must be >= 1.
    pub rounds: u32,
    /// How the debate decides it's finished.
    #[serde(default = "default_termination")]
    pub termination_condition: TerminationCondition,
    /// How the judge produces `finalSolution`.
    #[serde(default = "default_synthesis")]
    pub synthesis_method: SynthesisMethod,
    /// Whether prompts fall back to full formatted history when no
    /// summary is available.
    #[serde(default)]
    pub include_full_history: bool,
    /// Wall-clock budget for a single round, in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_per_round: DurationMs,
    /// Default summarization settings, overridable per agent.
    #[serde(default)]
    pub summarization: SummarizationConfig,
    /// Whether the state-machine orchestrator collects clarifying
    /// questions before round 1.
    #[serde(default)]
    pub interactive_clarifications: bool,
    /// Cap on clarification questions collected per agent.
    #[serde(default = "default_clarifications_max")]
    pub clarifications_max_per_agent: usize,
    /// Which tracing backend to attempt export to.
    #[serde(default)]
    pub trace: TraceBackend,
    /// Classic or state-machine.
    #[serde(default)]
    pub orchestrator_type: OrchestratorType,
}

fn default_termination() -> TerminationCondition {
    TerminationCondition::Rounds
}
fn default_synthesis() -> SynthesisMethod {
    SynthesisMethod::Single
}
fn default_timeout() -> DurationMs {
    DurationMs::from_secs(300)
}
fn default_clarifications_max() -> usize {
    3
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            termination_condition: TerminationCondition::Rounds,
            synthesis_method: SynthesisMethod::Single,
            include_full_history: false,
            timeout_per_round: default_timeout(),
            summarization: SummarizationConfig::default(),
            interactive_clarifications: false,
            clarifications_max_per_agent: default_clarifications_max(),
            trace: TraceBackend::None,
            orchestrator_type: OrchestratorType::Classic,
        }
    }
}

impl Default for OrchestratorType {
    fn default() -> Self {
        OrchestratorType::Classic
    }
}

impl Default for TraceBackend {
    fn default() -> Self {
        TraceBackend::None
    }
}

/// One of {proposal, critique, refinement} — the three contribution
/// shapes a phase can append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContributionKind {
    /// Produced by the propose phase.
    Proposal,
    /// Produced by the critique phase; targets another agent's proposal.
    Critique,
    /// Produced by the refine phase; supersedes the agent's own proposal.
    Refinement,
}

/// A record of one tool call made during a turn: the call, its
/// arguments, and the envelope it returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// The tool's registered name.
    pub name: String,
    /// The arguments the model supplied.
    pub args: serde_json::Value,
    /// The JSON envelope string the tool returned.
    pub result_envelope: String,
}

/// Per-contribution metrics and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionMetadata {
    /// Wall-clock time spent producing this contribution.
    pub latency_ms: DurationMs,
    /// Token usage, when the capability reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    /// Model identifier used.
    pub model: String,
    /// Tool calls made while producing this contribution, in the
    /// order they were requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRecord>,
    /// Set when the producing agent's capability call failed even
    /// after the one allowed retry; `content` is a placeholder in
    /// that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether a retry was attempted for this contribution.
    #[serde(default)]
    pub retried: bool,
}

/// One agent's output within a round: a proposal, a critique of
/// another agent's proposal, or a refinement of its own proposal.
/// Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    /// The agent that produced this contribution.
    pub agent_id: AgentId,
    /// That agent's role at the time it was enrolled.
    pub role: Role,
    /// proposal | critique | refinement.
    #[serde(rename = "type")]
    pub kind: ContributionKind,
    /// For critiques, the agent id whose proposal is being critiqued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_agent_id: Option<AgentId>,
    /// The contribution's text.
    pub content: String,
    /// Metrics and provenance.
    pub metadata: ContributionMetadata,
}

/// Metrics recorded alongside a produced [`Summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// Character count of the input before truncation.
    pub before_chars: usize,
    /// Character count of the output after truncation.
    pub after_chars: usize,
    /// Summarization method label.
    pub method: String,
    /// Wall-clock latency of the summarizing capability call.
    pub latency_ms: DurationMs,
    /// Token usage, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    /// Model used to summarize.
    pub model: String,
    /// Temperature used to summarize.
    pub temperature: f64,
    /// Provider used to summarize.
    pub provider: String,
    /// When the summary was produced.
    pub timestamp: DateTime<Utc>,
}

/// A per-agent condensation of prior history, substituted into later
/// prompts in place of full formatted history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// The role of the agent this summary was produced for.
    pub agent_role: Role,
    /// The summarized text, truncated to `maxLength`.
    pub summary: String,
    /// Metrics and provenance.
    pub metadata: SummaryMetadata,
}

/// One iteration of the phase sequence. Append-only within a round
/// until the round is sealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number; `rounds[i].round_number == i + 1`.
    pub round_number: u32,
    /// Contributions appended so far, in persistence order.
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    /// Per-agent summaries produced for this round, keyed by agent id.
    #[serde(default)]
    pub summaries: BTreeMap<String, Summary>,
    /// When this round was created.
    pub timestamp: DateTime<Utc>,
}

impl Round {
    /// Start a new, empty round.
    pub fn new(round_number: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            round_number,
            contributions: Vec::new(),
            summaries: BTreeMap::new(),
            timestamp,
        }
    }

    /// Count of proposals by the given agent in this round.
    pub fn proposal_count(&self, agent_id: &AgentId) -> usize {
        self.contributions
            .iter()
            .filter(|c| c.agent_id == *agent_id && c.kind == ContributionKind::Proposal)
            .count()
    }

    /// Count of refinements by the given agent in this round.
    pub fn refinement_count(&self, agent_id: &AgentId) -> usize {
        self.contributions
            .iter()
            .filter(|c| c.agent_id == *agent_id && c.kind == ContributionKind::Refinement)
            .count()
    }

    /// The proposal an agent made this round, if any. When a
    /// refinement exists it supersedes the original proposal as the
    /// "current" proposal for subsequent phases.
    pub fn current_proposal(&self, agent_id: &AgentId) -> Option<&Contribution> {
        self.contributions
            .iter()
            .rev()
            .find(|c| c.agent_id == *agent_id && c.kind != ContributionKind::Critique)
    }
}

/// One clarification question and, once answered, its answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarificationItem {
    /// Stable id assigned by the orchestrator at suspend time.
    pub id: ClarificationId,
    /// The question text, from the asking agent's perspective.
    pub question: String,
    /// The caller-supplied answer, once resumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// All clarification questions raised by one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentClarifications {
    /// The asking agent's id.
    pub agent_id: AgentId,
    /// The asking agent's display name.
    pub agent_name: String,
    /// The asking agent's role.
    pub role: Role,
    /// This agent's questions, capped at `clarificationsMaxPerAgent`.
    pub items: Vec<ClarificationItem>,
}

/// The judge's synthesized output, produced exactly once per
/// completed debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalSolution {
    /// The synthesized solution text.
    pub description: String,
    /// Trade-offs the judge identified.
    #[serde(default)]
    pub tradeoffs: Vec<String>,
    /// Concrete recommendations.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Judge's confidence in the solution, 0 to 100.
    pub confidence: u8,
    /// The judge agent's id.
    pub synthesized_by: AgentId,
    /// Major requirements from the problem statement the judge
    /// believes were not satisfied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfulfilled_major_requirements: Option<Vec<String>>,
}

/// Lifecycle status of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebateStatus {
    /// Created, not yet started.
    Pending,
    /// Actively running.
    Running,
    /// Paused awaiting clarification answers.
    Suspended,
    /// Finished; `finalSolution` is populated.
    Completed,
    /// Aborted by a fatal or validation error, or a round that
    /// produced zero proposals after a timeout.
    Failed,
}

/// Why a debate is suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspendReason {
    /// Waiting for clarification answers before round 1 can start.
    WaitingForInput,
}

/// Everything needed to resume a suspended debate without re-reading
/// state from elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspendPayload {
    /// The full set of questions the caller must answer, across all
    /// asking agents.
    pub questions: Vec<ClarificationItem>,
}

/// Which prompt source (file vs built-in) was used for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptSourceKind {
    /// Resolved from a file on disk.
    File,
    /// Fell back to the built-in default.
    BuiltIn,
}

/// Provenance of one resolved prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSource {
    /// file | built-in.
    pub source: PromptSourceKind,
    /// Absolute path, when `source == File`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_path: Option<String>,
}

/// The persisted record of a single debate. The only durable artifact
/// of a run; everything the orchestrator does is a mutation of this
/// document via the state store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateState {
    /// `deb-YYYYMMDD-HHMMSS-rrrr`.
    pub id: DebateId,
    /// The problem statement the debate was started with.
    pub problem: String,
    /// Optional free-form context supplied at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Current lifecycle status.
    pub status: DebateStatus,
    /// `rounds.len()` while running; see invariants.
    pub current_round: u32,
    /// Sealed and in-progress rounds, in order.
    #[serde(default)]
    pub rounds: Vec<Round>,
    /// Clarification questions and answers, when interactive
    /// clarifications were used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifications: Option<Vec<AgentClarifications>>,
    /// The judge's output, present iff `status == Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_solution: Option<FinalSolution>,
    /// Per-role prompt provenance, recorded once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_sources: Option<BTreeMap<String, PromptSource>>,
    /// When this debate was created.
    pub created_at: DateTime<Utc>,
    /// Monotonically increasing; bumped on every mutation.
    pub updated_at: DateTime<Utc>,
    /// Fields present in the document this crate does not know about.
    /// Preserved verbatim through read-modify-write cycles.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The discriminated result of running (or resuming) a debate,
/// returned instead of throwing to unwind the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExecutionResult {
    /// The debate ran to completion.
    Completed {
        /// The final debate document.
        result: Box<DebateState>,
    },
    /// The debate is paused awaiting external input.
    Suspended {
        /// Always `WaitingForInput` in this engine.
        suspend_reason: SuspendReason,
        /// Everything the caller needs to answer and resume.
        suspend_payload: SuspendPayload,
        /// The debate id to pass to `resume`.
        debate_id: DebateId,
    },
    /// The debate aborted.
    Failed {
        /// A human-readable description of the failure.
        error: String,
    },
}
