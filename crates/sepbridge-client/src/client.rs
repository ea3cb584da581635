//! High-level SEP2 operations.
//!
//! [`Sep2Client`] binds the well-known resource paths of an IEEE 2030.5
//! server to GET-plus-normalize calls. Discovery starts at the device
//! capability document; every other resource is reachable from the links
//! it advertises, so an arbitrary-path escape hatch is provided as well.

use std::collections::HashMap;

use crate::config::Sep2Config;
use crate::credentials;
use crate::error::Result;
use crate::normalize::{normalize, XmlValue};
use crate::transport::Transport;

/// Well-known SEP2 resource paths.
pub mod endpoints {
    pub const DEVICE_CAPABILITY: &str = "/dcap";
    pub const DEMAND_RESPONSE_PROGRAMS: &str = "/drp";
    pub const DER_PROGRAMS: &str = "/derp";
    pub const RESPONSE_SETS: &str = "/rsps";
    pub const TIME: &str = "/tm";
    pub const USAGE_POINTS: &str = "/upt";
    pub const END_DEVICES: &str = "/edev";
    pub const MIRROR_USAGE_POINTS: &str = "/mup";
    pub const SELF_DEVICE: &str = "/sdev";
}

/// A normalized response. Ownership transfers to the caller; nothing is
/// cached.
#[derive(Debug)]
pub struct Sep2Response {
    pub data: XmlValue,
    pub status: u16,
    pub headers: HashMap<String, String>,
}

/// Outcome of a connection probe. Diagnostic, not data retrieval: any
/// underlying failure is folded into the message instead of propagating.
#[derive(Debug, Clone)]
pub struct ConnectionReport {
    pub success: bool,
    pub message: String,
}

/// Read-only client for one IEEE 2030.5 server.
pub struct Sep2Client {
    transport: Transport,
    config: Sep2Config,
}

impl Sep2Client {
    /// Build a client from validated configuration.
    ///
    /// Resolves credentials and constructs the transport up front, so a
    /// bad certificate or unreadable key file fails here rather than on
    /// the first request. No network traffic is generated.
    pub fn new(config: Sep2Config) -> Result<Self> {
        config.validate()?;
        let creds = credentials::resolve(&config)?;
        let transport = Transport::new(&config, &creds)?;
        Ok(Self { transport, config })
    }

    /// Build a client from `SEP2_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Sep2Config::from_env()?)
    }

    pub fn config(&self) -> &Sep2Config {
        &self.config
    }

    async fn fetch(&self, path: &str) -> Result<Sep2Response> {
        let raw = self.transport.get(path).await?;
        let data = normalize(&raw.body)?;
        Ok(Sep2Response {
            data,
            status: raw.status,
            headers: raw.headers,
        })
    }

    /// The discovery document advertising all other resources.
    pub async fn device_capabilities(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::DEVICE_CAPABILITY).await
    }

    pub async fn demand_response_programs(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::DEMAND_RESPONSE_PROGRAMS).await
    }

    pub async fn der_programs(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::DER_PROGRAMS).await
    }

    pub async fn response_sets(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::RESPONSE_SETS).await
    }

    pub async fn time(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::TIME).await
    }

    pub async fn usage_points(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::USAGE_POINTS).await
    }

    pub async fn end_devices(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::END_DEVICES).await
    }

    pub async fn mirror_usage_points(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::MIRROR_USAGE_POINTS).await
    }

    pub async fn self_device(&self) -> Result<Sep2Response> {
        self.fetch(endpoints::SELF_DEVICE).await
    }

    /// Fetch an arbitrary resource path, passed through unmodified.
    ///
    /// Not a security boundary: the backend decides what paths exist.
    pub async fn custom_endpoint(&self, path: &str) -> Result<Sep2Response> {
        self.fetch(path).await
    }

    /// Probe the server by fetching the discovery document.
    pub async fn test_connection(&self) -> ConnectionReport {
        match self.device_capabilities().await {
            Ok(response) => {
                let poll_rate = response
                    .data
                    .get("pollRate")
                    .and_then(XmlValue::as_str)
                    .unwrap_or("not specified");
                ConnectionReport {
                    success: true,
                    message: format!("Connected successfully. Poll rate: {poll_rate}"),
                }
            }
            Err(e) => ConnectionReport {
                success: false,
                message: e.to_string(),
            },
        }
    }
}
