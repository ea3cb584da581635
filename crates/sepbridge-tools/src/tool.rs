//! The tool abstraction: a named, schema-described operation callable
//! with JSON arguments.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;

/// A single text block in a tool response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// What a tool hands back to the protocol layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    pub content: Vec<TextContent>,
}

impl ToolOutput {
    /// A single text payload.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
        }
    }
}

/// Static descriptor advertised to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Unified interface for tool implementation.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn input_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> Result<ToolOutput>;

    /// The advertised descriptor.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Shared trait object for registry storage.
pub type DynTool = Arc<dyn Tool>;

/// Schema for a tool taking no arguments.
pub fn empty_object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false,
    })
}

/// Schema for an object with the given properties, all required.
pub fn object_schema(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// A string-typed property with a description.
pub fn string_property(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_output_wire_shape() {
        let output = ToolOutput::text("hello");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "hello"}]})
        );
    }

    #[test]
    fn test_object_schema_shape() {
        let schema = object_schema(
            json!({"endpoint": string_property("Resource path")}),
            vec!["endpoint"],
        );
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"][0], "endpoint");
        assert_eq!(schema["properties"]["endpoint"]["type"], "string");
    }
}
