//! HTTP(S) transport with mutual-TLS client authentication.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::debug;

use crate::config::Sep2Config;
use crate::credentials::ResolvedCredentials;
use crate::error::{ClientError, Result};

/// Accept header preferring the SEP2 media type with XML fallbacks.
const ACCEPT_VALUE: &str = "application/sep+xml, application/xml, */*";

/// An HTTP response before normalization.
///
/// Statuses pass through unmodified; classifying 4xx/5xx is the
/// caller's concern.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// A GET-only HTTP client bound to one server.
///
/// Built once per client lifetime. The inner `reqwest::Client` pools
/// connections and is safe to share across concurrently in-flight
/// commands.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Build the transport from validated configuration and resolved
    /// credential material. Fails without touching the network.
    pub fn new(config: &Sep2Config, credentials: &ResolvedCredentials) -> Result<Self> {
        let identity = reqwest::Identity::from_pem(&identity_pem(credentials))
            .map_err(|e| ClientError::Credential(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        // SEP2 servers negotiate TLS 1.2; newer versions are not part of
        // the transport profile.
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(identity)
            .max_tls_version(reqwest::tls::Version::TLS_1_2)
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .user_agent(config.user_agent.clone());

        if let Some(ca) = &credentials.ca {
            // Supplied CA material replaces the default trust store, same
            // as handing `ca` to a TLS stack directly.
            builder = builder.tls_built_in_root_certs(false);
            let roots = reqwest::Certificate::from_pem_bundle(ca)
                .map_err(|e| ClientError::Credential(e.to_string()))?;
            for root in roots {
                builder = builder.add_root_certificate(root);
            }
        }

        if config.insecure {
            debug!("peer certificate validation disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to initialize HTTP transport: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Perform a GET against a root-relative resource path.
    ///
    /// The path is joined onto the base URL as-is; the backend server is
    /// the authority on which paths are valid. A single deadline covers
    /// the full request/response cycle, and no retries are attempted.
    pub async fn get(&self, path: &str) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| classify(e, path, started))?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify(e, path, started))?
            .to_vec();

        debug!(status, bytes = body.len(), "response");
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// For a combined PEM the material already holds cert and key; otherwise
/// concatenate so the TLS layer sees both blocks.
fn identity_pem(credentials: &ResolvedCredentials) -> Vec<u8> {
    if credentials.key == credentials.cert {
        return credentials.cert.clone();
    }
    let mut pem = credentials.cert.clone();
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend_from_slice(&credentials.key);
    pem
}

fn classify(error: reqwest::Error, path: &str, started: Instant) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout {
            path: path.to_string(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    } else {
        ClientError::Transport {
            path: path.to_string(),
            source: error,
        }
    }
}
