//! A minimal [`Agent`] returning fixed text, for exercising the
//! orchestrator without a real capability.

use async_trait::async_trait;

use crate::agent::{Agent, AgentTurnOutput, DebateContext, PreparedContext};
use crate::duration::DurationMs;
use crate::error::ProviderError;
use crate::id::AgentId;
use crate::model::{Contribution, ContributionMetadata};
use crate::role::Role;

/// An [`Agent`] that always returns the same canned text for every
/// operation, with no tool calls and no summarization. Used to
/// exercise orchestrator phase fan-out/fan-in without a real
/// capability.
pub struct FixedAgent {
    id: AgentId,
    name: String,
    role: Role,
    text: String,
}

impl FixedAgent {
    /// Build a fixed-response agent.
    pub fn new(id: impl Into<AgentId>, name: impl Into<String>, role: Role, text: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), role, text: text.into() }
    }

    fn output(&self) -> AgentTurnOutput {
        AgentTurnOutput {
            content: self.text.clone(),
            metadata: ContributionMetadata {
                latency_ms: DurationMs::ZERO,
                tokens_used: None,
                model: "fixed".to_string(),
                tool_calls: vec![],
                error: None,
                retried: false,
            },
        }
    }
}

#[async_trait]
impl Agent for FixedAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        self.role
    }

    async fn propose(&self, _ctx: &DebateContext) -> Result<AgentTurnOutput, ProviderError> {
        Ok(self.output())
    }

    async fn critique(
        &self,
        _ctx: &DebateContext,
        _target: &Contribution,
    ) -> Result<AgentTurnOutput, ProviderError> {
        Ok(self.output())
    }

    async fn refine(
        &self,
        _ctx: &DebateContext,
        _original: &Contribution,
        _critiques: &[Contribution],
    ) -> Result<AgentTurnOutput, ProviderError> {
        Ok(self.output())
    }

    async fn prepare_context(
        &self,
        _ctx: &DebateContext,
        _formatted_history: &str,
    ) -> Result<PreparedContext, ProviderError> {
        Ok(PreparedContext { context: None, summary: None })
    }

    async fn ask_clarifying_questions(
        &self,
        _problem: &str,
    ) -> Result<Vec<String>, ProviderError> {
        Ok(vec![])
    }

    fn should_summarize(&self, _formatted_history: &str) -> bool {
        false
    }
}
