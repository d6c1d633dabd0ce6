//! [`TracingHook`]: the concrete exporter of the span contract in
//! spec §4.9, using OTel GenAI semantic-convention attribute names
//! alongside debate-specific ones.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use debate_protocol::{DebateHook, DebateHookEvent, ToolOutcome, TracingError};
use tracing::Span;

/// Emits `tracing` spans for every agent method, capability call, and
/// tool execution, nested under the running span of the invoking
/// agent. Always observes, never alters behavior — `on_event` only
/// fails if span bookkeeping finds an invariant violated, and even
/// then the orchestrator ignores the error per the hook contract.
///
/// A per-agent stack of open spans supports re-entrancy: an agent
/// method opens its span by pushing, and closes it by popping, so a
/// capability call nested inside always finds the right parent even
/// if (hypothetically) an agent's own method were to recurse.
#[derive(Default)]
pub struct TracingHook {
    agent_spans: Mutex<HashMap<String, Vec<Span>>>,
    llm_spans: Mutex<HashMap<String, Span>>,
    tool_spans: Mutex<HashMap<String, Span>>,
}

impl TracingHook {
    /// Create a hook with no open spans.
    pub fn new() -> Self {
        Self::default()
    }

    fn current_agent_span(&self, agent_id: &str) -> Option<Span> {
        self.agent_spans.lock().unwrap().get(agent_id).and_then(|stack| stack.last().cloned())
    }

    fn push_agent_span(&self, agent_id: &str, span: Span) {
        self.agent_spans.lock().unwrap().entry(agent_id.to_string()).or_default().push(span);
    }

    fn pop_agent_span(&self, agent_id: &str) {
        if let Some(stack) = self.agent_spans.lock().unwrap().get_mut(agent_id) {
            stack.pop();
        }
    }

    fn llm_key(agent_id: Option<&str>, iteration: u32) -> String {
        format!("{}:{iteration}", agent_id.unwrap_or("__judge__"))
    }
}

#[async_trait]
impl DebateHook for TracingHook {
    async fn on_event(&self, event: &DebateHookEvent<'_>) -> Result<(), TracingError> {
        match event {
            DebateHookEvent::RoundStart { round, total } => {
                tracing::info_span!("debate.round", debate.round = round, debate.round.total = total)
                    .in_scope(|| tracing::info!("round starting"));
            }
            DebateHookEvent::PhaseStart { round, phase, expected_count } => {
                tracing::info_span!(
                    "debate.phase",
                    debate.round = round,
                    debate.phase = phase.as_str(),
                    debate.phase.expected_count = expected_count,
                )
                .in_scope(|| tracing::info!("phase starting"));
            }
            DebateHookEvent::PhaseComplete { round, phase } => {
                tracing::info_span!("debate.phase", debate.round = round, debate.phase = phase.as_str())
                    .in_scope(|| tracing::info!("phase complete"));
            }
            DebateHookEvent::AgentStart { agent_id, agent_name, activity } => {
                let span = tracing::info_span!(
                    "agent.method",
                    otel.name = format!("agent-{}-{}", activity.as_str(), agent_id).as_str(),
                    debate.agent_id = %agent_id,
                    debate.agent_name = agent_name,
                    debate.agent_method = activity.as_str(),
                );
                self.push_agent_span(agent_id.as_str(), span);
            }
            DebateHookEvent::AgentComplete { agent_id, .. } => {
                self.pop_agent_span(agent_id.as_str());
            }
            DebateHookEvent::SummarizationStart { agent_id } => {
                tracing::info_span!("debate.summarize", debate.agent_id = %agent_id)
                    .in_scope(|| tracing::info!("summarization starting"));
            }
            DebateHookEvent::SummarizationComplete { agent_id, before_chars, after_chars } => {
                tracing::info_span!("debate.summarize", debate.agent_id = %agent_id)
                    .in_scope(|| tracing::info!(before_chars, after_chars, "summarization complete"));
            }
            DebateHookEvent::SummarizationEnd { round } => {
                tracing::info!(debate.round = round, "summarization finished for round");
            }
            DebateHookEvent::SynthesisStart => {
                tracing::info!("judge synthesis starting");
            }
            DebateHookEvent::SynthesisComplete => {
                tracing::info!("judge synthesis complete");
            }
            DebateHookEvent::LlmCallStart { agent_id, iteration, model } => {
                let parent = agent_id.and_then(|id| self.current_agent_span(id.as_str()));
                let span = match &parent {
                    Some(parent) => tracing::info_span!(
                        parent: parent,
                        "generation",
                        gen_ai.system = "debate",
                        gen_ai.request.model = model,
                        debate.llm.iteration = iteration,
                    ),
                    None => tracing::info_span!(
                        "generation",
                        gen_ai.system = "debate",
                        gen_ai.request.model = model,
                        debate.llm.iteration = iteration,
                    ),
                };
                span.in_scope(|| tracing::debug!("generation starting"));
                let key = Self::llm_key(agent_id.map(|a| a.as_str()), *iteration);
                self.llm_spans.lock().unwrap().insert(key, span);
            }
            DebateHookEvent::LlmCallEnd { agent_id, iteration, input_tokens, output_tokens } => {
                let key = Self::llm_key(agent_id.map(|a| a.as_str()), *iteration);
                if let Some(span) = self.llm_spans.lock().unwrap().remove(&key) {
                    span.in_scope(|| {
                        tracing::debug!(
                            gen_ai.usage.input_tokens = input_tokens,
                            gen_ai.usage.output_tokens = output_tokens,
                            "generation complete"
                        );
                    });
                }
            }
            DebateHookEvent::ToolExecutionStart { agent_id, tool_name } => {
                let parent = self.current_agent_span(agent_id.as_str());
                let span = match &parent {
                    Some(parent) => tracing::info_span!(
                        parent: parent,
                        "gen_ai.execute_tool",
                        gen_ai.tool.name = tool_name,
                        debate.agent_id = %agent_id,
                    ),
                    None => tracing::info_span!(
                        "gen_ai.execute_tool",
                        gen_ai.tool.name = tool_name,
                        debate.agent_id = %agent_id,
                    ),
                };
                span.in_scope(|| tracing::debug!("tool execution starting"));
                self.tool_spans.lock().unwrap().insert(format!("{agent_id}:{tool_name}"), span);
            }
            DebateHookEvent::ToolExecutionEnd { agent_id, tool_name, outcome } => {
                let key = format!("{agent_id}:{tool_name}");
                if let Some(span) = self.tool_spans.lock().unwrap().remove(&key) {
                    span.in_scope(|| match outcome {
                        ToolOutcome::Success { output } => tracing::debug!(output, "tool execution succeeded"),
                        ToolOutcome::Error { message } => tracing::error!(message, "tool execution failed"),
                        ToolOutcome::Malformed { raw } => tracing::warn!(raw, "tool returned a malformed envelope"),
                    });
                }
            }
        }
        Ok(())
    }
}
