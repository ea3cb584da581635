//! Error types for the tools crate.

use sepbridge_client::ClientError;

/// Tool error types.
///
/// `NotFound` and `InvalidArguments` are terminal classifications the
/// dispatch boundary passes through verbatim; everything else reaching
/// that boundary is wrapped exactly once as an execution failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Execution error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

// Client failures surface to callers as execution errors with the
// classified message preserved.
impl From<ClientError> for ToolError {
    fn from(e: ClientError) -> Self {
        ToolError::Execution(e.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::NotFound("sep2_get_time".to_string());
        assert!(err.to_string().contains("sep2_get_time"));
    }

    #[test]
    fn test_client_error_preserves_message() {
        let client_err = ClientError::Parse("unexpected end of stream".to_string());
        let tool_err: ToolError = client_err.into();
        assert!(matches!(tool_err, ToolError::Execution(_)));
        assert!(tool_err.to_string().contains("unexpected end of stream"));
    }
}
