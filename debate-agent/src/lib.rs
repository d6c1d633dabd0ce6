#![deny(missing_docs)]
//! The role-specialized agent actor.
//!
//! [`DebateAgent`] implements [`debate_protocol::Agent`] over any
//! [`debate_protocol::Capability`]: `propose`/`critique`/`refine` run
//! the tool-calling inner loop ([`turn`]), `prepare_context` drives the
//! summarizer, and `ask_clarifying_questions` makes one non-looping
//! capability call. The same type doubles as the judge — any
//! `DebateAgent` also implements [`debate_protocol::JudgeAgent`] via
//! [`judge::parse_synthesis`].

mod judge;
mod turn;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use debate_hooks::HookRegistry;
use debate_protocol::{
    Agent, AgentId, AgentTurnOutput, Capability, CapabilityRequest, Contribution, DebateContext,
    FinalSolution, JudgeAgent, PreparedContext, ProviderError, Role, Round, SummarizationConfig,
    ToolContext,
};
use debate_tool::ToolRegistry;

pub use judge::{extract_json, parse_questions, parse_synthesis};
pub use turn::DEFAULT_TOOL_CALL_LIMIT;

/// A role-specialized actor: identity, generation settings, resolved
/// prompts, and a tool registry, wired against a concrete capability.
pub struct DebateAgent<C: Capability> {
    id: AgentId,
    name: String,
    role: Role,
    capability: C,
    tools: ToolRegistry,
    context_dir: Option<PathBuf>,
    model: String,
    provider: String,
    temperature: f64,
    system_prompt: String,
    summary_prompt: String,
    clarification_prompt: String,
    judge_synthesis_prompt: Option<String>,
    summarization: SummarizationConfig,
    tool_call_limit: u32,
    hooks: Option<Arc<HookRegistry>>,
}

impl<C: Capability> DebateAgent<C> {
    /// Build an agent. `tool_call_limit` defaults to
    /// [`DEFAULT_TOOL_CALL_LIMIT`]; use [`Self::with_tool_call_limit`]
    /// to override it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        role: Role,
        capability: C,
        tools: ToolRegistry,
        model: impl Into<String>,
        provider: impl Into<String>,
        temperature: f64,
        system_prompt: impl Into<String>,
        summary_prompt: impl Into<String>,
        clarification_prompt: impl Into<String>,
        summarization: SummarizationConfig,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            capability,
            tools,
            context_dir: None,
            model: model.into(),
            provider: provider.into(),
            temperature,
            system_prompt: system_prompt.into(),
            summary_prompt: summary_prompt.into(),
            clarification_prompt: clarification_prompt.into(),
            judge_synthesis_prompt: None,
            summarization,
            tool_call_limit: DEFAULT_TOOL_CALL_LIMIT,
            hooks: None,
        }
    }

    /// Scope this agent's file-backed tools to `dir`.
    pub fn with_context_dir(mut self, dir: PathBuf) -> Self {
        self.context_dir = Some(dir);
        self
    }

    /// Override the synthesis prompt used only by
    /// [`JudgeAgent::synthesize`] when this agent is configured as the
    /// judge.
    pub fn with_judge_synthesis_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.judge_synthesis_prompt = Some(prompt.into());
        self
    }

    /// Override the default tool-calling iteration cap.
    pub fn with_tool_call_limit(mut self, limit: u32) -> Self {
        self.tool_call_limit = limit;
        self
    }

    /// Wire a hook registry so capability calls and tool executions
    /// emit `LlmCallStart`/`LlmCallEnd`/`ToolExecutionStart`/`ToolExecutionEnd`
    /// nested under the caller's active agent span. Without this, the
    /// agent still runs, just unobserved below the per-method level.
    pub fn with_hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    fn tool_ctx(&self, formatted_context: Option<&str>) -> ToolContext {
        ToolContext {
            context_dir: self.context_dir.clone(),
            formatted_context: formatted_context.map(str::to_string),
            full_history_json: None,
        }
    }

    async fn run_turn(
        &self,
        ctx: &DebateContext,
        user_prompt: &str,
    ) -> Result<AgentTurnOutput, ProviderError> {
        let tool_ctx = self.tool_ctx(ctx.previous_context.as_deref());
        turn::run_tool_loop(
            &self.capability,
            &self.tools,
            &tool_ctx,
            self.hooks.as_deref(),
            &self.id,
            &self.model,
            self.temperature,
            &self.system_prompt,
            user_prompt,
            self.tool_call_limit,
        )
        .await
    }
}

#[async_trait]
impl<C: Capability> Agent for DebateAgent<C> {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        self.role
    }

    async fn propose(&self, ctx: &DebateContext) -> Result<AgentTurnOutput, ProviderError> {
        let base = turn::propose_user_prompt(&ctx.problem);
        let user_prompt = debate_context::prepend_context(&base, ctx.previous_context.as_deref());
        self.run_turn(ctx, &user_prompt).await
    }

    async fn critique(
        &self,
        ctx: &DebateContext,
        target: &Contribution,
    ) -> Result<AgentTurnOutput, ProviderError> {
        let base = turn::critique_user_prompt(&ctx.problem, target);
        let user_prompt = debate_context::prepend_context(&base, ctx.previous_context.as_deref());
        self.run_turn(ctx, &user_prompt).await
    }

    async fn refine(
        &self,
        ctx: &DebateContext,
        original: &Contribution,
        critiques: &[Contribution],
    ) -> Result<AgentTurnOutput, ProviderError> {
        let base = turn::refine_user_prompt(&ctx.problem, original, critiques);
        let user_prompt = debate_context::prepend_context(&base, ctx.previous_context.as_deref());
        self.run_turn(ctx, &user_prompt).await
    }

    async fn prepare_context(
        &self,
        _ctx: &DebateContext,
        formatted_history: &str,
    ) -> Result<PreparedContext, ProviderError> {
        if !self.should_summarize(formatted_history) {
            return Ok(PreparedContext { context: None, summary: None });
        }
        let summary = debate_context::summarize(
            &self.capability,
            self.role,
            &self.summarization,
            &self.system_prompt,
            &self.summary_prompt,
            formatted_history,
            &self.model,
            self.temperature,
            &self.provider,
        )
        .await?;
        Ok(PreparedContext { context: Some(summary.summary.clone()), summary: Some(summary) })
    }

    async fn ask_clarifying_questions(&self, problem: &str) -> Result<Vec<String>, ProviderError> {
        let request = CapabilityRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
            user_prompt: format!("{}\n\nThe problem:\n{problem}", self.clarification_prompt),
            messages: vec![],
            tools: None,
        };
        let response = self.capability.complete(request).await?;
        Ok(parse_questions(&response.text))
    }

    fn should_summarize(&self, formatted_history: &str) -> bool {
        self.summarization.enabled && formatted_history.chars().count() > self.summarization.threshold
    }
}

#[async_trait]
impl<C: Capability> JudgeAgent for DebateAgent<C> {
    async fn synthesize(
        &self,
        rounds: &[Round],
        problem: &str,
        context: Option<&str>,
    ) -> Result<FinalSolution, ProviderError> {
        let synthesis_prompt = self
            .judge_synthesis_prompt
            .as_deref()
            .unwrap_or(debate_prompt::default_judge_synthesis_prompt());
        let history = debate_context::format_history(rounds);
        let mut user_prompt =
            format!("{synthesis_prompt}\n\nThe problem:\n{problem}\n\nFull debate history:\n{history}");
        if let Some(extra) = context {
            user_prompt.push_str(&format!("\n\nAdditional context:\n{extra}"));
        }
        let request = CapabilityRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
            user_prompt,
            messages: vec![],
            tools: None,
        };
        // No active agent span wraps synthesis (the orchestrator only emits
        // SynthesisStart/SynthesisComplete around this call), so this
        // generation span is attributed to no agent, per the judge-without-
        // an-agent-span case the hook contract explicitly allows.
        let response = turn::call_capability(&self.capability, self.hooks.as_deref(), None, 1, request).await?;
        Ok(parse_synthesis(&response.text, self.id.clone()))
    }
}
