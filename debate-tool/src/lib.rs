#![deny(missing_docs)]
//! Per-agent tool registry and the built-in tools every agent can be
//! configured with.
//!
//! [`ToolRegistry`] holds `Arc<dyn ToolDyn>` entries keyed by name and
//! is immutable once an agent starts using it — construction happens
//! before any round runs. The built-in tools (`file_read`,
//! `list_files`, `context_search`) implement
//! [`debate_protocol::ToolDyn`] directly rather than being merely
//! contracted.

mod builtin;

use std::collections::HashMap;
use std::sync::Arc;

use debate_protocol::{ToolContext, ToolDyn};

pub use builtin::{ContextSearchTool, FileReadTool, ListFilesTool};

/// Registry of tools available to an agent's tool-calling loop.
///
/// Duplicate registrations overwrite the previous tool with the same
/// name, per the registry contract.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolDyn>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Register a tool, overwriting any existing tool with the same
    /// name.
    pub fn register(&mut self, tool: Arc<dyn ToolDyn>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolDyn>> {
        self.tools.get(name)
    }

    /// Iterate over all registered tools.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ToolDyn>> {
        self.tools.values()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Call a tool by name, returning its envelope string.
    ///
    /// Returns `Err` only when `name` isn't registered — a tool's own
    /// failure comes back as a `call()` error envelope (`Ok`), not as
    /// `Err`, per the registry contract.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<String, debate_protocol::ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| debate_protocol::ToolError::NotFound(name.to_string()))?;
        tool.call(args, ctx).await
    }

    /// Build a registry with every built-in tool registered.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(Arc::new(FileReadTool));
        reg.register(Arc::new(ListFilesTool));
        reg.register(Arc::new(ContextSearchTool));
        reg
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
