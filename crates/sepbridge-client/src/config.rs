//! Environment-sourced client configuration.
//!
//! All configuration comes from `SEP2_*` environment variables; there is
//! no config file or CLI grammar. The hosting process decides when to
//! read the environment and whether a configuration failure is fatal.

use std::path::PathBuf;

use crate::error::{ClientError, Result};

/// Environment variable names understood by [`Sep2Config::from_env`].
pub mod env_vars {
    pub const BASE_URL: &str = "SEP2_BASE_URL";
    pub const CERT_PATH: &str = "SEP2_CERT_PATH";
    pub const CERT_VALUE: &str = "SEP2_CERT_VALUE";
    pub const KEY_PATH: &str = "SEP2_KEY_PATH";
    pub const KEY_VALUE: &str = "SEP2_KEY_VALUE";
    pub const CA_PATH: &str = "SEP2_CA_PATH";
    pub const CA_VALUE: &str = "SEP2_CA_VALUE";
    pub const INSECURE: &str = "SEP2_INSECURE";
    pub const TIMEOUT_MS: &str = "SEP2_TIMEOUT_MS";
    pub const USER_AGENT: &str = "SEP2_USER_AGENT";
}

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Accepted timeout range in milliseconds.
pub const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 1_000..=300_000;
/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("sepbridge/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a SEP2 server.
///
/// The client certificate may be supplied inline (PEM text in the
/// environment) or as a filesystem path. When no separate key is given
/// the certificate material doubles as the key, which supports combined
/// PEM files carrying both.
#[derive(Debug, Clone)]
pub struct Sep2Config {
    /// Absolute base URL of the server, without a trailing slash.
    pub base_url: String,
    pub cert_path: Option<PathBuf>,
    pub cert_value: Option<String>,
    pub key_path: Option<PathBuf>,
    pub key_value: Option<String>,
    pub ca_path: Option<PathBuf>,
    pub ca_value: Option<String>,
    /// Disable peer certificate validation. For lab servers only.
    pub insecure: bool,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Sep2Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| get(name).filter(|v| !v.is_empty());

        let base_url = get(env_vars::BASE_URL).ok_or_else(|| {
            ClientError::Config(format!("{} environment variable is required", env_vars::BASE_URL))
        })?;

        let timeout_ms = match get(env_vars::TIMEOUT_MS) {
            Some(raw) => raw.parse().map_err(|_| {
                ClientError::Config(format!("{} must be a valid number", env_vars::TIMEOUT_MS))
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let config = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cert_path: get(env_vars::CERT_PATH).map(PathBuf::from),
            cert_value: get(env_vars::CERT_VALUE),
            key_path: get(env_vars::KEY_PATH).map(PathBuf::from),
            key_value: get(env_vars::KEY_VALUE),
            ca_path: get(env_vars::CA_PATH).map(PathBuf::from),
            ca_value: get(env_vars::CA_VALUE),
            insecure: get(env_vars::INSECURE)
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            timeout_ms,
            user_agent: get(env_vars::USER_AGENT).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a client construction relies on.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::Config("base URL is required".to_string()));
        }
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(ClientError::Config(format!(
                "base URL {:?} is not a valid absolute URL",
                self.base_url
            )));
        }
        if self.cert_path.is_none() && self.cert_value.is_none() {
            return Err(ClientError::Config(format!(
                "either {} or {} is required",
                env_vars::CERT_PATH,
                env_vars::CERT_VALUE
            )));
        }
        if !TIMEOUT_RANGE_MS.contains(&self.timeout_ms) {
            return Err(ClientError::Config(format!(
                "timeout must be between {} and {} milliseconds",
                TIMEOUT_RANGE_MS.start(),
                TIMEOUT_RANGE_MS.end()
            )));
        }
        Ok(())
    }
}

/// Names of required configuration inputs absent from the process
/// environment. Empty when everything required is present.
pub fn missing_env_inputs() -> Vec<String> {
    missing_inputs(|name| std::env::var(name).ok())
}

pub(crate) fn missing_inputs(get: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let present = |name: &str| get(name).filter(|v| !v.is_empty()).is_some();

    let mut missing = Vec::new();
    if !present(env_vars::BASE_URL) {
        missing.push(env_vars::BASE_URL.to_string());
    }
    if !present(env_vars::CERT_PATH) && !present(env_vars::CERT_VALUE) {
        missing.push(format!("{} or {}", env_vars::CERT_PATH, env_vars::CERT_VALUE));
    }
    missing
}
