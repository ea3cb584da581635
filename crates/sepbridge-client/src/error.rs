//! Error types for the SEP2 client crate.

use std::path::PathBuf;

/// Errors that can occur when configuring or talking to a SEP2 server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Missing or invalid configuration. Fatal to client construction,
    /// not to the hosting process.
    #[error("configuration error: {0}")]
    Config(String),

    /// A certificate, key, or CA source on disk could not be read.
    #[error("failed to read {what} from {}: {source}", .path.display())]
    CredentialRead {
        what: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Credential material was read but rejected by the TLS layer.
    #[error("invalid credential material: {0}")]
    Credential(String),

    /// The request deadline elapsed before a complete response arrived.
    #[error("GET {path} timed out after {elapsed_ms} ms")]
    Timeout { path: String, elapsed_ms: u64 },

    /// Connection, TLS handshake, or other HTTP-layer failure.
    #[error("GET {path} failed: {source}")]
    Transport {
        path: String,
        source: reqwest::Error,
    },

    /// The response body was not a well-formed XML document.
    #[error("XML parse error: {0}")]
    Parse(String),
}

/// Result type for SEP2 client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
