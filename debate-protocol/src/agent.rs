//! The Agent protocol boundary: propose/critique/refine plus the
//! context-preparation and clarification operations every role-based
//! agent exposes, and the Judge's extension of it.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::id::AgentId;
use crate::model::{Contribution, ContributionMetadata, FinalSolution, Role, Round, Summary};

/// The problem and round position an agent operation runs against.
/// Agents never see the full `DebateState`; they see this plus
/// whatever `previous_context` the Context Formatter produced for
/// them.
#[derive(Debug, Clone)]
pub struct DebateContext {
    /// The problem statement.
    pub problem: String,
    /// The formatted "Previous Debate" section, already resolved by
    /// the Context Formatter. `None` means the section is omitted
    /// entirely (summarization disabled and `includeFullHistory=false`).
    pub previous_context: Option<String>,
    /// The round this operation is running within.
    pub round_number: u32,
}

/// The `{content, metadata}` shape shared by propose/critique/refine
/// results before the orchestrator wraps them into a `Contribution`
/// (attaching `agent_id`, `role`, and `kind`).
#[derive(Debug, Clone)]
pub struct AgentTurnOutput {
    /// The produced text.
    pub content: String,
    /// Metrics and tool-call trace for this turn.
    pub metadata: ContributionMetadata,
}

/// The result of `prepareContext`: a possibly-substituted context
/// string for subsequent prompts, and the summary produced along the
/// way if summarization fired.
#[derive(Debug, Clone)]
pub struct PreparedContext {
    /// The context to use for this round's prompts — either the full
    /// formatted history, a prior summary, or a freshly produced one.
    pub context: Option<String>,
    /// Present when this call produced a new summary.
    pub summary: Option<Summary>,
}

/// A role-specialized, LLM-backed actor with a fixed interface.
///
/// Object-safe so the orchestrator can hold a roster as
/// `Vec<Arc<dyn Agent>>` and fan out phases without knowing each
/// agent's concrete provider type.
#[async_trait]
pub trait Agent: Send + Sync {
    /// This agent's stable id.
    fn id(&self) -> &AgentId;

    /// This agent's display name.
    fn name(&self) -> &str;

    /// The role this agent argues from.
    fn role(&self) -> Role;

    /// Produce an initial proposal for `ctx.problem`. Runs the
    /// tool-calling inner loop.
    async fn propose(&self, ctx: &DebateContext) -> Result<AgentTurnOutput, ProviderError>;

    /// Critique another agent's proposal. `target` must not be one of
    /// this agent's own contributions.
    async fn critique(
        &self,
        ctx: &DebateContext,
        target: &Contribution,
    ) -> Result<AgentTurnOutput, ProviderError>;

    /// Produce a refinement of `original` given the critiques that
    /// targeted it.
    async fn refine(
        &self,
        ctx: &DebateContext,
        original: &Contribution,
        critiques: &[Contribution],
    ) -> Result<AgentTurnOutput, ProviderError>;

    /// Decide the context to carry into this round's prompts,
    /// summarizing first if `should_summarize` says so and
    /// summarization is enabled and the threshold is exceeded.
    async fn prepare_context(
        &self,
        ctx: &DebateContext,
        formatted_history: &str,
    ) -> Result<PreparedContext, ProviderError>;

    /// Concise questions this agent would ask before debating
    /// `problem`, from its own role's perspective.
    async fn ask_clarifying_questions(
        &self,
        problem: &str,
    ) -> Result<Vec<String>, ProviderError>;

    /// Whether `formatted_history` is long enough, under this agent's
    /// summarization config, to warrant producing a summary.
    fn should_summarize(&self, formatted_history: &str) -> bool;
}

/// The judge's extension of [`Agent`]: synthesis of the full round
/// history into one final solution.
#[async_trait]
pub trait JudgeAgent: Agent {
    /// Produce the debate's final solution from its full round
    /// history.
    async fn synthesize(
        &self,
        rounds: &[Round],
        problem: &str,
        context: Option<&str>,
    ) -> Result<FinalSolution, ProviderError>;
}
