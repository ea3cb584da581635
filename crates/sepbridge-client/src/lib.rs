//! SEP2 Client Crate
//!
//! Read-only client for IEEE 2030.5 (Smart Energy Profile) servers.
//!
//! ## Capabilities
//!
//! - **Configuration**: `SEP2_*` environment variables, validated before
//!   any network activity
//! - **Credentials**: inline or file-based PEM material for mutual TLS,
//!   with combined cert+key files supported
//! - **Transport**: GET-only HTTPS with a single request deadline and
//!   status passthrough
//! - **Normalization**: tolerant XML-to-tree flattening, namespace
//!   agnostic, no schema imposed
//! - **Operations**: the well-known SEP2 resource set plus arbitrary
//!   paths and a diagnostic connection probe

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod normalize;
pub mod transport;

pub use client::{endpoints, ConnectionReport, Sep2Client, Sep2Response};
pub use config::{env_vars, missing_env_inputs, Sep2Config, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
pub use credentials::ResolvedCredentials;
pub use error::{ClientError, Result};
pub use normalize::{normalize, XmlValue};
pub use transport::{RawResponse, Transport};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
