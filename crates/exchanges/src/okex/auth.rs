//! OKEx authentication and request signing
//!
//! Signed requests carry four headers:
//! - `OK-ACCESS-KEY`: the API key
//! - `OK-ACCESS-SIGN`: Base64(HMAC-SHA256(secret, timestamp + METHOD + requestPath + body))
//! - `OK-ACCESS-TIMESTAMP`: ISO-8601 UTC with milliseconds
//! - `OK-ACCESS-PASSPHRASE`: the passphrase chosen when the key was created
//!
//! `requestPath` includes the query string for GET requests.

use crate::errors::{ExchangeError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use okspot_core::prelude::*;
use sha2::Sha256;
use std::fmt;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const HEADER_ACCESS_KEY: &str = "OK-ACCESS-KEY";
pub const HEADER_ACCESS_SIGN: &str = "OK-ACCESS-SIGN";
pub const HEADER_ACCESS_TIMESTAMP: &str = "OK-ACCESS-TIMESTAMP";
pub const HEADER_ACCESS_PASSPHRASE: &str = "OK-ACCESS-PASSPHRASE";

/// OKEx API credentials
#[derive(Clone)]
pub struct OkexCredentials {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
}

impl OkexCredentials {
    pub fn new(api_key: String, secret_key: String, passphrase: String) -> Self {
        Self {
            api_key,
            secret_key,
            passphrase,
        }
    }

    /// Load credentials from `OKEX_API_KEY`, `OKEX_SECRET_KEY` and `OKEX_PASSPHRASE`
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| ExchangeError::MissingCredentials(name.to_string()))
        };

        Ok(Self::new(
            read("OKEX_API_KEY")?,
            read("OKEX_SECRET_KEY")?,
            read("OKEX_PASSPHRASE")?,
        ))
    }

    /// All three parts present
    pub fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty() && !self.passphrase.is_empty()
    }
}

impl fmt::Debug for OkexCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OkexCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Signs REST requests with the account credentials
#[derive(Debug, Clone)]
pub struct OkexSigner {
    credentials: OkexCredentials,
}

impl OkexSigner {
    pub fn new(credentials: OkexCredentials) -> Result<Self> {
        if !credentials.is_valid() {
            return Err(ExchangeError::InvalidCredentials);
        }

        Ok(Self { credentials })
    }

    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    /// Base64 HMAC-SHA256 over `timestamp + method + request_path + body`
    pub fn sign(&self, timestamp: &str, method: &str, request_path: &str, body: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.as_bytes())
            .map_err(|e| ExchangeError::SigningError(format!("HMAC setup failed: {e}")))?;

        mac.update(timestamp.as_bytes());
        mac.update(method.as_bytes());
        mac.update(request_path.as_bytes());
        mac.update(body.as_bytes());

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Auth headers for a request made at `timestamp`
    pub fn auth_headers(
        &self,
        timestamp: Timestamp,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<Vec<(&'static str, String)>> {
        let stamp = timestamp.to_iso8601();
        let signature = self.sign(&stamp, method, request_path, body)?;

        debug!("🔐 Signed request: {} {}", method, request_path);

        Ok(vec![
            (HEADER_ACCESS_KEY, self.credentials.api_key.clone()),
            (HEADER_ACCESS_SIGN, signature),
            (HEADER_ACCESS_TIMESTAMP, stamp),
            (HEADER_ACCESS_PASSPHRASE, self.credentials.passphrase.clone()),
        ])
    }

    /// Check a signature produced elsewhere
    pub fn validate_signature(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
        signature: &str,
    ) -> bool {
        self.sign(timestamp, method, request_path, body)
            .is_ok_and(|expected| expected == signature)
    }
}
