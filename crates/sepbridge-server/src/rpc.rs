//! JSON-RPC 2.0 over stdio.
//!
//! One JSON document per line in each direction. The method surface is
//! the MCP subset this bridge speaks: `initialize`, `ping`,
//! `tools/list`, `tools/call`, `prompts/list`, `prompts/get`.
//! Notifications (requests without an id) are consumed without a reply.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use sepbridge_tools::{ToolError, ToolRegistry};

use crate::prompts::PromptRegistry;

pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
}

/// The stdio server: a tool registry plus prompt registry behind a
/// line-oriented JSON-RPC loop.
pub struct RpcServer {
    tools: ToolRegistry,
    prompts: PromptRegistry,
}

impl RpcServer {
    pub fn new(tools: ToolRegistry, prompts: PromptRegistry) -> Self {
        Self { tools, prompts }
    }

    /// Serve requests until the reader reaches end of input.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        Ok(())
    }

    /// Handle one raw request line. `None` means no reply is owed
    /// (notification).
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("unparsable request: {e}");
                return Some(Response::error(
                    Value::Null,
                    RpcError {
                        code: error_codes::PARSE_ERROR,
                        message: format!("parse error: {e}"),
                    },
                ));
            }
        };
        self.handle(request).await
    }

    /// Handle one parsed request.
    pub async fn handle(&self, request: Request) -> Option<Response> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(Response::error(
                id,
                RpcError {
                    code: error_codes::INVALID_REQUEST,
                    message: "expected jsonrpc \"2.0\"".to_string(),
                },
            ));
        }

        debug!(method = %request.method, "request");
        let outcome = self.dispatch(&request.method, request.params).await;
        Some(match outcome {
            Ok(result) => Response::result(id, result),
            Err(error) => Response::error(id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {}, "prompts": {} },
                "serverInfo": {
                    "name": "sepbridge",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tools.definitions() })),
            "tools/call" => {
                let params: CallParams = parse_params(params)?;
                let args = if params.arguments.is_null() {
                    json!({})
                } else {
                    params.arguments
                };
                let output = self
                    .tools
                    .execute(&params.name, args)
                    .await
                    .map_err(tool_error_to_rpc)?;
                serde_json::to_value(output).map_err(internal)
            }
            "prompts/list" => Ok(json!({ "prompts": self.prompts.definitions() })),
            "prompts/get" => {
                let params: GetPromptParams = parse_params(params)?;
                let (definition, content) =
                    self.prompts.get(&params.name).ok_or_else(|| RpcError {
                        code: error_codes::METHOD_NOT_FOUND,
                        message: format!("Prompt not found: {}", params.name),
                    })?;
                Ok(json!({
                    "description": definition.description,
                    "messages": [{
                        "role": "user",
                        "content": { "type": "text", "text": content },
                    }],
                }))
            }
            other => Err(RpcError {
                code: error_codes::METHOD_NOT_FOUND,
                message: format!("method not found: {other}"),
            }),
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError {
        code: error_codes::INVALID_PARAMS,
        message: format!("invalid params: {e}"),
    })
}

fn internal(e: impl std::fmt::Display) -> RpcError {
    RpcError {
        code: error_codes::INTERNAL_ERROR,
        message: e.to_string(),
    }
}

/// Map already-classified tool failures onto JSON-RPC codes. NotFound
/// and InvalidArguments pass through with their own codes; everything
/// else is an internal error with the original message preserved.
fn tool_error_to_rpc(error: ToolError) -> RpcError {
    let code = match error {
        ToolError::NotFound(_) => error_codes::METHOD_NOT_FOUND,
        ToolError::InvalidArguments(_) => error_codes::INVALID_PARAMS,
        _ => error_codes::INTERNAL_ERROR,
    };
    RpcError {
        code,
        message: error.to_string(),
    }
}
