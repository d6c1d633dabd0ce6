//! The tool-calling inner loop shared by `propose`/`critique`/`refine`.

use std::time::Instant;

use debate_hooks::HookRegistry;
use debate_protocol::{
    error_envelope, AgentId, AgentTurnOutput, CapabilityMessage, CapabilityRequest,
    CapabilityResponse, CapabilityToolSchema, Contribution, ContributionMetadata,
    DebateHookEvent, DurationMs, ProviderError, ToolCallRecord, ToolContext, ToolOutcome,
};
use debate_tool::ToolRegistry;

/// Default cap on tool-calling iterations within one agent turn, per
/// role, when an agent's config does not override it.
pub const DEFAULT_TOOL_CALL_LIMIT: u32 = 8;

fn tool_schemas(tools: &ToolRegistry) -> Vec<CapabilityToolSchema> {
    tools
        .iter()
        .map(|t| CapabilityToolSchema {
            name: t.name().to_string(),
            description: t.description().to_string(),
            input_schema: t.input_schema(),
        })
        .collect()
}

/// Call the capability, emitting `LlmCallStart`/`LlmCallEnd` around it
/// when a hook registry is wired in. `agent_id` is `None` for the
/// judge's synthesis call, which runs without an enclosing agent
/// span.
pub(crate) async fn call_capability(
    capability: &impl debate_protocol::Capability,
    hooks: Option<&HookRegistry>,
    agent_id: Option<&AgentId>,
    iteration: u32,
    request: CapabilityRequest,
) -> Result<CapabilityResponse, ProviderError> {
    if let Some(hooks) = hooks {
        hooks
            .dispatch(&DebateHookEvent::LlmCallStart { agent_id, iteration, model: &request.model })
            .await;
    }
    let result = capability.complete(request).await;
    if let Some(hooks) = hooks {
        let (input_tokens, output_tokens) = match &result {
            Ok(response) => (
                response.usage.as_ref().map(|u| u.input_tokens),
                response.usage.as_ref().map(|u| u.output_tokens),
            ),
            Err(_) => (None, None),
        };
        hooks
            .dispatch(&DebateHookEvent::LlmCallEnd { agent_id, iteration, input_tokens, output_tokens })
            .await;
    }
    result
}

/// Classify a tool's JSON envelope into the outcome the tracing hook
/// ends its span with.
fn tool_outcome_from_envelope(envelope: &str) -> ToolOutcome {
    match serde_json::from_str::<serde_json::Value>(envelope) {
        Ok(value) => match value.get("status").and_then(|s| s.as_str()) {
            Some("success") => ToolOutcome::Success {
                output: value.get("result").cloned().unwrap_or(serde_json::Value::Null).to_string(),
            },
            Some("error") => ToolOutcome::Error {
                message: value.get("error").and_then(|e| e.as_str()).unwrap_or("unknown error").to_string(),
            },
            _ => ToolOutcome::Malformed { raw: envelope.to_string() },
        },
        Err(_) => ToolOutcome::Malformed { raw: envelope.to_string() },
    }
}

/// Run the tool-calling loop for one turn: call the capability, satisfy
/// any pending tool calls via `tools`, and repeat until the model
/// returns text with no pending calls or `tool_call_limit` iterations
/// have been spent. `hooks`/`agent_id` drive the `generation` and
/// `gen_ai.execute_tool` spans nested under the caller's agent span;
/// `iteration` in the emitted events resets to 1 at the start of every
/// call to this function, matching one agent-method boundary.
#[allow(clippy::too_many_arguments)]
pub async fn run_tool_loop(
    capability: &impl debate_protocol::Capability,
    tools: &ToolRegistry,
    tool_ctx: &ToolContext,
    hooks: Option<&HookRegistry>,
    agent_id: &AgentId,
    model: &str,
    temperature: f64,
    system_prompt: &str,
    user_prompt: &str,
    tool_call_limit: u32,
) -> Result<AgentTurnOutput, ProviderError> {
    let schemas = tool_schemas(tools);
    let mut messages: Vec<CapabilityMessage> = Vec::new();
    let mut tool_calls_record: Vec<ToolCallRecord> = Vec::new();
    let mut tokens_used: Option<u32> = None;
    let started = Instant::now();
    let mut iteration: u32 = 0;

    loop {
        iteration += 1;
        let request = CapabilityRequest {
            model: model.to_string(),
            temperature,
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            messages: messages.clone(),
            tools: if schemas.is_empty() { None } else { Some(schemas.clone()) },
        };

        let response = call_capability(capability, hooks, Some(agent_id), iteration, request).await?;
        if let Some(usage) = response.usage {
            tokens_used = Some(tokens_used.unwrap_or(0) + usage.total_tokens);
        }

        if !response.has_pending_tool_calls() {
            return Ok(AgentTurnOutput {
                content: response.text,
                metadata: ContributionMetadata {
                    latency_ms: DurationMs::from_millis(started.elapsed().as_millis() as u64),
                    tokens_used,
                    model: model.to_string(),
                    tool_calls: tool_calls_record,
                    error: None,
                    retried: false,
                },
            });
        }

        if iteration > tool_call_limit {
            let envelope = error_envelope("tool call limit exceeded");
            for call in &response.tool_calls {
                tool_calls_record.push(ToolCallRecord {
                    name: call.name.clone(),
                    args: serde_json::Value::Null,
                    result_envelope: envelope.clone(),
                });
            }
            return Ok(AgentTurnOutput {
                content: response.text,
                metadata: ContributionMetadata {
                    latency_ms: DurationMs::from_millis(started.elapsed().as_millis() as u64),
                    tokens_used,
                    model: model.to_string(),
                    tool_calls: tool_calls_record,
                    error: Some("tool call limit exceeded".to_string()),
                    retried: false,
                },
            });
        }

        messages.push(CapabilityMessage::assistant(response.text.clone()));
        for call in &response.tool_calls {
            let args: serde_json::Value =
                serde_json::from_str(&call.arguments_json).unwrap_or(serde_json::Value::Null);
            if let Some(hooks) = hooks {
                hooks
                    .dispatch(&DebateHookEvent::ToolExecutionStart { agent_id, tool_name: &call.name })
                    .await;
            }
            let envelope = match tools.call(&call.name, args.clone(), tool_ctx).await {
                Ok(envelope) => envelope,
                Err(err) => error_envelope(err.to_string()),
            };
            if let Some(hooks) = hooks {
                hooks
                    .dispatch(&DebateHookEvent::ToolExecutionEnd {
                        agent_id,
                        tool_name: &call.name,
                        outcome: tool_outcome_from_envelope(&envelope),
                    })
                    .await;
            }
            messages.push(CapabilityMessage::tool_result(call.id.clone(), envelope.clone()));
            tool_calls_record.push(ToolCallRecord { name: call.name.clone(), args, result_envelope: envelope });
        }
    }
}

/// Render a contribution's content into the `rolePrompt.user(...)` text
/// a critique turn reasons about.
pub fn critique_user_prompt(problem: &str, target: &Contribution) -> String {
    format!(
        "The problem:\n{problem}\n\nCritique the following proposal from {}:\n\n{}",
        target.agent_id, target.content
    )
}

/// Render the user prompt for a refine turn.
pub fn refine_user_prompt(problem: &str, original: &Contribution, critiques: &[Contribution]) -> String {
    let mut out = format!(
        "The problem:\n{problem}\n\nYour original proposal:\n{}\n\nCritiques received:\n",
        original.content
    );
    if critiques.is_empty() {
        out.push_str("(none)\n");
    } else {
        for critique in critiques {
            out.push_str(&format!("- {}: {}\n", critique.agent_id, critique.content));
        }
    }
    out.push_str("\nRefine your proposal in light of these critiques.");
    out
}

/// Render the user prompt for a propose turn.
pub fn propose_user_prompt(problem: &str) -> String {
    format!("The problem:\n{problem}\n\nPropose a solution from your role's perspective.")
}
