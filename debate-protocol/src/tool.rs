//! The Tool Registry protocol boundary: object-safe, synchronous
//! tools producing a JSON envelope.

use crate::error::ToolError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// A tool's JSON Schema-described input and a human-readable
/// description, as handed to the capability alongside a request.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// The tool's registered name.
    pub name: String,
    /// Shown to the model.
    pub description: String,
    /// JSON Schema for the input object.
    pub input_schema: Value,
}

/// Context a tool's `execute` may read from but never mutate: the
/// per-call formatted history and, for tools that prefer the
/// authoritative record (e.g. `context_search`), the full debate
/// state.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// The directory file-backed tools resolve relative paths
    /// against; every resolved path must be a descendant of this
    /// directory after resolving symlinks on both sides.
    pub context_dir: Option<std::path::PathBuf>,
    /// The formatted "previous context" text for the calling agent's
    /// current turn.
    pub formatted_context: Option<String>,
    /// The full round history, serialized, for tools that need the
    /// authoritative record rather than the formatted summary.
    pub full_history_json: Option<Value>,
}

/// Despite the name, tools are **synchronous** per the spec — they
/// MUST NOT invoke the LLM — but the trait still returns a boxed
/// future so it stays object-safe under `Arc<dyn ToolDyn>` without
/// requiring `async-trait`'s macro on a crate with no other async
/// trait methods. Implementations that are truly synchronous simply
/// return an already-resolved future.
pub trait ToolDyn: Send + Sync {
    /// The tool's registered name.
    fn name(&self) -> &str;

    /// A human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for this tool's input object.
    fn input_schema(&self) -> Value;

    /// Run the tool, returning a JSON envelope string:
    /// `{"status":"success","result":…}` or
    /// `{"status":"error","error":…}`. Tool-level failures are
    /// returned as an error envelope, not as `Err` — `Err` is
    /// reserved for registry-level failures (tool not found).
    fn call<'a>(
        &'a self,
        args: Value,
        ctx: &'a ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;
}

/// Render a successful result as the spec's envelope.
pub fn success_envelope(result: impl Into<Value>) -> String {
    serde_json::json!({ "status": "success", "result": result.into() }).to_string()
}

/// Render a failure as the spec's envelope.
pub fn error_envelope(error: impl Into<String>) -> String {
    serde_json::json!({ "status": "error", "error": error.into() }).to_string()
}
