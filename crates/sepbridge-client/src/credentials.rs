//! Resolution of TLS credential material from configuration.

use std::fs;
use std::path::Path;

use crate::config::{env_vars, Sep2Config};
use crate::error::{ClientError, Result};

/// PEM material ready for the transport layer.
///
/// `key` equals `cert` when the source is a combined PEM file carrying
/// both the certificate and the private key.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub cert: Vec<u8>,
    pub key: Vec<u8>,
    pub ca: Option<Vec<u8>>,
}

/// Resolve certificate, key, and optional CA material.
///
/// Inline values take precedence over paths. Read failures are fatal;
/// there is no retry and no fallback between the two source kinds.
pub fn resolve(config: &Sep2Config) -> Result<ResolvedCredentials> {
    let ca = resolve_ca(config)?;

    if let Some(cert) = &config.cert_value {
        let key = config.key_value.as_ref().unwrap_or(cert);
        return Ok(ResolvedCredentials {
            cert: cert.clone().into_bytes(),
            key: key.clone().into_bytes(),
            ca,
        });
    }

    if let Some(cert_path) = &config.cert_path {
        let cert = read_pem("certificate", cert_path)?;
        let key = match &config.key_path {
            Some(key_path) => read_pem("private key", key_path)?,
            None => cert.clone(),
        };
        return Ok(ResolvedCredentials { cert, key, ca });
    }

    Err(ClientError::Config(format!(
        "either {} or {} is required",
        env_vars::CERT_PATH,
        env_vars::CERT_VALUE
    )))
}

fn resolve_ca(config: &Sep2Config) -> Result<Option<Vec<u8>>> {
    if let Some(value) = &config.ca_value {
        return Ok(Some(value.clone().into_bytes()));
    }
    match &config.ca_path {
        Some(path) => Ok(Some(read_pem("CA certificate", path)?)),
        None => Ok(None),
    }
}

fn read_pem(what: &'static str, path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ClientError::CredentialRead {
        what,
        path: path.to_path_buf(),
        source,
    })
}
