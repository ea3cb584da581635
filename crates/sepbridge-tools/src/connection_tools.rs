//! Connection and status tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use sepbridge_client::{missing_env_inputs, Sep2Client};

use crate::error::Result;
use crate::tool::{empty_object_schema, Tool, ToolOutput};

/// Always-available status report.
///
/// This is the one tool that works in both registry modes. In reduced
/// mode it names the configuration inputs missing from the environment,
/// so a first-run user can see what to set without reading logs.
pub struct StatusTool {
    client: Option<Arc<Sep2Client>>,
}

impl StatusTool {
    pub fn new(client: Option<Arc<Sep2Client>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for StatusTool {
    fn name(&self) -> &str {
        "sep2_status"
    }

    fn description(&self) -> &str {
        "Check SEP2 client status and configuration"
    }

    fn input_schema(&self) -> Value {
        empty_object_schema()
    }

    async fn execute(&self, _args: Value) -> Result<ToolOutput> {
        let text = match &self.client {
            Some(client) => format!(
                "SEP2 client is initialized and ready (server: {})",
                client.config().base_url
            ),
            None => {
                let missing = missing_env_inputs();
                if missing.is_empty() {
                    "SEP2 client is not available: configuration values are present but \
                     invalid. Check the server logs for the rejected value."
                        .to_string()
                } else {
                    let mut text =
                        String::from("SEP2 client is not available. Missing configuration:\n");
                    for name in missing {
                        text.push_str("- ");
                        text.push_str(&name);
                        text.push('\n');
                    }
                    text
                }
            }
        };
        Ok(ToolOutput::text(text))
    }
}

/// Probe the configured server and report the outcome as text.
pub struct TestConnectionTool {
    client: Arc<Sep2Client>,
}

impl TestConnectionTool {
    pub fn new(client: Arc<Sep2Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TestConnectionTool {
    fn name(&self) -> &str {
        "sep2_test_connection"
    }

    fn description(&self) -> &str {
        "Test connection to the SEP2 server"
    }

    fn input_schema(&self) -> Value {
        empty_object_schema()
    }

    async fn execute(&self, _args: Value) -> Result<ToolOutput> {
        let report = self.client.test_connection().await;
        let outcome = if report.success { "successful" } else { "failed" };
        Ok(ToolOutput::text(format!(
            "Connection test {outcome}: {}",
            report.message
        )))
    }
}
