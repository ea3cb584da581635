//! Tool registry: the capability-gated dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use sepbridge_client::Sep2Client;

use crate::connection_tools::{StatusTool, TestConnectionTool};
use crate::data_tools;
use crate::error::{Result, ToolError};
use crate::tool::{DynTool, ToolDefinition, ToolOutput};

/// A build-once lookup table from tool name to implementation.
///
/// Two modes, decided at construction: with a configured client every
/// tool is registered; without one only the status tool is. Advertised
/// descriptors are derived from the same table that dispatch reads, so a
/// descriptor without a handler (or the reverse) cannot exist.
pub struct ToolRegistry {
    tools: HashMap<String, DynTool>,
}

impl ToolRegistry {
    /// Build the registry for an optionally-configured client.
    pub fn for_client(client: Option<Arc<Sep2Client>>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Arc::new(StatusTool::new(client.clone())));

        if let Some(client) = client {
            registry.register(Arc::new(TestConnectionTool::new(client.clone())));
            for tool in data_tools::data_tools(&client) {
                registry.register(tool);
            }
        }

        info!(tools = registry.len(), "tool registry built");
        registry
    }

    fn register(&mut self, tool: DynTool) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Check if a tool exists.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Advertised descriptors, sorted by name for stable enumeration.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool by name.
    ///
    /// Unknown names fail with [`ToolError::NotFound`]; handler errors
    /// come back already classified and are not wrapped again.
    pub async fn execute(&self, name: &str, args: Value) -> Result<ToolOutput> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_mode_has_only_status() {
        let registry = ToolRegistry::for_client(None);
        assert_eq!(registry.len(), 1);
        assert!(registry.has("sep2_status"));
        assert!(!registry.has("sep2_get_time"));
    }

    #[tokio::test]
    async fn test_reduced_mode_rejects_data_tools() {
        let registry = ToolRegistry::for_client(None);
        let err = registry
            .execute("sep2_get_time", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_status_works_without_client() {
        let registry = ToolRegistry::for_client(None);
        let output = registry
            .execute("sep2_status", serde_json::json!({}))
            .await
            .unwrap();
        assert!(output.content[0].text.contains("not available"));
    }

    #[test]
    fn test_definitions_sorted() {
        let registry = ToolRegistry::for_client(None);
        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "sep2_status");
    }
}
