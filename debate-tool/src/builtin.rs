//! Built-in tools: `file_read`, `list_files`, `context_search`.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use debate_protocol::{error_envelope, success_envelope, ToolContext, ToolDyn, ToolError};
use serde_json::{json, Value};

/// Resolve `requested` against `context_dir`, then verify it is a
/// descendant of `context_dir` after resolving symlinks on both
/// sides. Returns the canonical path on success.
fn resolve_descendant(context_dir: &Path, requested: &str) -> Result<PathBuf, ToolError> {
    let root = context_dir
        .canonicalize()
        .map_err(|e| ToolError::ExecutionFailed(format!("context dir unavailable: {e}")))?;
    let joined = context_dir.join(requested);
    let resolved = joined
        .canonicalize()
        .map_err(|e| ToolError::InvalidInput(format!("cannot resolve path: {e}")))?;
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(ToolError::PathEscape(requested.to_string()))
    }
}

/// Reads a file's contents, refusing any path outside the configured
/// context directory.
pub struct FileReadTool;

impl ToolDyn for FileReadTool {
    fn name(&self) -> &str {
        "file_read"
    }

    fn description(&self) -> &str {
        "Read the contents of a file within the debate's context directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"],
        })
    }

    fn call<'a>(
        &'a self,
        args: Value,
        ctx: &'a ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let path = match args.get("path").and_then(Value::as_str) {
                Some(p) => p,
                None => return Ok(error_envelope("missing required field: path")),
            };
            let Some(context_dir) = ctx.context_dir.as_deref() else {
                return Ok(error_envelope("no context directory configured"));
            };
            match resolve_descendant(context_dir, path) {
                Ok(resolved) => match tokio::fs::read_to_string(&resolved).await {
                    Ok(contents) => Ok(success_envelope(json!({ "contents": contents }))),
                    Err(e) => Ok(error_envelope(format!("read failed: {e}"))),
                },
                Err(e) => Ok(error_envelope(e.to_string())),
            }
        })
    }
}

/// Lists file names within a directory under the configured context
/// directory.
pub struct ListFilesTool;

impl ToolDyn for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files in a directory within the debate's context directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "path": { "type": "string", "default": "." } },
        })
    }

    fn call<'a>(
        &'a self,
        args: Value,
        ctx: &'a ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let path = args.get("path").and_then(Value::as_str).unwrap_or(".");
            let Some(context_dir) = ctx.context_dir.as_deref() else {
                return Ok(error_envelope("no context directory configured"));
            };
            let resolved = match resolve_descendant(context_dir, path) {
                Ok(r) => r,
                Err(e) => return Ok(error_envelope(e.to_string())),
            };
            let mut entries = match tokio::fs::read_dir(&resolved).await {
                Ok(e) => e,
                Err(e) => return Ok(error_envelope(format!("list failed: {e}"))),
            };
            let mut names = Vec::new();
            loop {
                match entries.next_entry().await {
                    Ok(Some(entry)) => names.push(entry.file_name().to_string_lossy().into_owned()),
                    Ok(None) => break,
                    Err(e) => return Ok(error_envelope(format!("list failed: {e}"))),
                }
            }
            names.sort();
            Ok(success_envelope(json!({ "files": names })))
        })
    }
}

/// Searches the debate's recorded history for a substring, preferring
/// the authoritative full round history over the per-call formatted
/// context.
pub struct ContextSearchTool;

impl ToolDyn for ContextSearchTool {
    fn name(&self) -> &str {
        "context_search"
    }

    fn description(&self) -> &str {
        "Search the debate's recorded history for a query string."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "query": { "type": "string" } },
            "required": ["query"],
        })
    }

    fn call<'a>(
        &'a self,
        args: Value,
        ctx: &'a ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move {
            let Some(query) = args.get("query").and_then(Value::as_str) else {
                return Ok(error_envelope("missing required field: query"));
            };
            let haystack = if let Some(history) = &ctx.full_history_json {
                history.to_string()
            } else if let Some(formatted) = &ctx.formatted_context {
                formatted.clone()
            } else {
                return Ok(success_envelope(json!({ "matches": Vec::<String>::new() })));
            };
            let matches: Vec<&str> = haystack
                .lines()
                .filter(|line| line.contains(query))
                .collect();
            Ok(success_envelope(json!({ "matches": matches })))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn file_read_returns_contents() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let ctx = ToolContext { context_dir: Some(dir.path().to_path_buf()), ..Default::default() };
        let out = FileReadTool
            .call(json!({"path": "a.txt"}), &ctx)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["result"]["contents"], "hello");
    }

    #[tokio::test]
    async fn file_read_refuses_path_escape() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), "nope").unwrap();
        let ctx = ToolContext { context_dir: Some(dir.path().to_path_buf()), ..Default::default() };
        let escape = format!("../{}/secret.txt", outside.path().file_name().unwrap().to_string_lossy());
        let out = FileReadTool.call(json!({"path": escape}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["status"], "error");
    }

    #[tokio::test]
    async fn list_files_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        let ctx = ToolContext { context_dir: Some(dir.path().to_path_buf()), ..Default::default() };
        let out = ListFilesTool.call(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["result"]["files"], json!(["a.txt", "b.txt"]));
    }

    #[tokio::test]
    async fn context_search_prefers_full_history() {
        let ctx = ToolContext {
            full_history_json: Some(json!({"round": "authoritative answer"})),
            formatted_context: Some("summary text".to_string()),
            ..Default::default()
        };
        let out = ContextSearchTool
            .call(json!({"query": "authoritative"}), &ctx)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["status"], "success");
        assert!(!parsed["result"]["matches"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn context_search_missing_query_errors() {
        let ctx = ToolContext::default();
        let out = ContextSearchTool.call(json!({}), &ctx).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["status"], "error");
    }
}
