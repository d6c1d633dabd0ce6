//! The LLM Capability: the single abstract `complete` operation every
//! agent calls through. No wire protocol, no provider SDK — adapting a
//! real backend onto this trait is left to the embedding application.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::ProviderError;

/// A single exchanged message in a capability request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityMessage {
    /// `"system"`, `"user"`, `"assistant"`, or `"tool"`.
    pub role: String,
    /// The message text.
    pub content: String,
    /// Present on tool-role messages: the `ToolCallRequest::id` this
    /// message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl CapabilityMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into(), tool_call_id: None }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into(), tool_call_id: None }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into(), tool_call_id: None }
    }

    /// Build a tool-result message answering `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: "tool".into(), content: content.into(), tool_call_id: Some(tool_call_id.into()) }
    }
}

/// A tool schema attached to a request so the model knows what it can
/// call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityToolSchema {
    /// The tool's registered name.
    pub name: String,
    /// A human-readable description shown to the model.
    pub description: String,
    /// JSON Schema for the tool's input object.
    pub input_schema: serde_json::Value,
}

/// A request to the capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRequest {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// The system prompt.
    pub system_prompt: String,
    /// The latest user prompt (appended after `messages` if both are
    /// present, matching the "build messages = [system, user]" step
    /// of the tool-calling inner loop).
    pub user_prompt: String,
    /// Prior turns in this capability conversation (tool loop
    /// history). Empty on the first call of a turn.
    #[serde(default)]
    pub messages: Vec<CapabilityMessage>,
    /// Tool schemas available to the model, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<CapabilityToolSchema>>,
}

/// One tool-call request emitted by the model. The caller must
/// satisfy every entry before a final textual response is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// An id scoping the matching `tool_result` message.
    pub id: String,
    /// The tool's registered name.
    pub name: String,
    /// Raw JSON-encoded arguments.
    pub arguments_json: String,
}

/// Token accounting reported by the capability, when available.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    pub input_tokens: u32,
    /// Tokens consumed by the completion.
    pub output_tokens: u32,
    /// `input_tokens + output_tokens`.
    pub total_tokens: u32,
}

/// The capability's response to one `complete` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityResponse {
    /// The model's textual output. May be empty when `tool_calls` is
    /// non-empty and the model deferred its text to a later turn.
    pub text: String,
    /// Pending tool calls the caller must satisfy before treating
    /// `text` as final.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Token usage, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl CapabilityResponse {
    /// Whether this response still has tool calls the agent must run
    /// before it can treat `text` as the turn's final output.
    pub fn has_pending_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// The narrow abstract LLM operation every agent calls through.
///
/// Intentionally not object-safe (uses `impl Future` in return
/// position) — the object-safe boundary callers hold onto is the
/// `Agent` trait, not this one. A concrete implementation adapts a
/// real provider SDK; a `MockCapability` test double (behind
/// `test-utils`) scripts canned responses for deterministic tests.
pub trait Capability: Send + Sync {
    /// Send one request, returning text, optional tool calls, and
    /// optional usage. Fails with [`ProviderError::InvalidRequest`]
    /// (fatal for the calling turn) or a transient variant (retriable
    /// once by the orchestrator).
    fn complete(
        &self,
        request: CapabilityRequest,
    ) -> impl Future<Output = Result<CapabilityResponse, ProviderError>> + Send;
}
