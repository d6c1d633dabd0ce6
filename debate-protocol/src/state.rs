//! The State Store protocol boundary: a per-debate, append-oriented
//! JSON document with atomic writes.

use async_trait::async_trait;

use crate::error::{FatalInternal, ValidationError};
use crate::id::{AgentId, DebateId};
use crate::model::{
    AgentClarifications, AgentConfig, Contribution, DebateState, DebateStatus, FinalSolution,
    PromptSource, Summary,
};

/// Errors a store operation can raise. Most store failures are
/// [`FatalInternal`] (the document is unreadable, an invariant the
/// store enforces was violated) rather than transient — a debate's
/// document is local and single-writer, so I/O failures here are not
/// expected to be retriable the way a network call is.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// See [`FatalInternal`].
    #[error(transparent)]
    Fatal(#[from] FatalInternal),
}

/// Per-debate, append-oriented persistent record.
///
/// Object-safe so callers can hold `Arc<dyn DebateStore>` without
/// committing to a backend. The orchestrator is the only caller;
/// writes are serialized per debate id internally so concurrent
/// phase tasks cannot interleave a partial append.
#[async_trait]
pub trait DebateStore: Send + Sync {
    /// Create a new debate document in `Pending` status.
    async fn create(
        &self,
        problem: &str,
        agents: &[AgentConfig],
        judge: &AgentConfig,
        context: Option<&str>,
    ) -> Result<DebateState, StoreError>;

    /// Append one contribution to the given round, creating the round
    /// if it does not already exist as the next expected round
    /// number.
    async fn append_contribution(
        &self,
        id: &DebateId,
        round_number: u32,
        contribution: Contribution,
    ) -> Result<(), StoreError>;

    /// Record a per-agent summary for the given round.
    async fn set_summary(
        &self,
        id: &DebateId,
        round_number: u32,
        agent_id: &AgentId,
        summary: Summary,
    ) -> Result<(), StoreError>;

    /// Seal the given round, bumping `current_round`.
    async fn seal_round(&self, id: &DebateId, round_number: u32) -> Result<(), StoreError>;

    /// Record the clarification questions (and, on resume, answers)
    /// collected for this debate.
    async fn set_clarifications(
        &self,
        id: &DebateId,
        clarifications: Vec<AgentClarifications>,
    ) -> Result<(), StoreError>;

    /// Record the judge's output and atomically transition to
    /// `Completed`.
    async fn set_final_solution(
        &self,
        id: &DebateId,
        solution: FinalSolution,
    ) -> Result<(), StoreError>;

    /// Transition the debate's status.
    async fn set_status(&self, id: &DebateId, status: DebateStatus) -> Result<(), StoreError>;

    /// Record which prompt source (file vs built-in) was used for
    /// each role label.
    async fn set_prompt_sources(
        &self,
        id: &DebateId,
        sources: std::collections::BTreeMap<String, PromptSource>,
    ) -> Result<(), StoreError>;

    /// Read the current document. Returns `Ok(None)` when no document
    /// exists for `id`.
    async fn get(&self, id: &DebateId) -> Result<Option<DebateState>, StoreError>;
}
