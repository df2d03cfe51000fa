//! OKEx REST transport
//!
//! Concrete [`Transport`] over the monoio HTTPS client:
//! - builds the request path and JSON body
//! - signs private requests with [`OkexSigner`]
//! - applies the configured timeout
//! - classifies non-2xx replies into [`ApiError`] or plain HTTP errors

use crate::errors::{ApiError, ExchangeError, Result};
use crate::http::{HttpResponse, MonoioHttpsClient};
use crate::okex::auth::{OkexCredentials, OkexSigner};
use crate::traits::{Method, QueryParams, Transport};
use async_trait::async_trait;
use okspot_core::prelude::*;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.okex.com";

/// OKEx client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkexConfig {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub enable_timing: bool,
}

impl Default for OkexConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            passphrase: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 5000,
            enable_timing: true,
        }
    }
}

impl OkexConfig {
    pub fn with_credentials(mut self, api_key: String, secret_key: String, passphrase: String) -> Self {
        self.api_key = api_key;
        self.secret_key = secret_key;
        self.passphrase = passphrase;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_timing(mut self, enable: bool) -> Self {
        self.enable_timing = enable;
        self
    }

    /// Read credentials (and an optional `OKEX_BASE_URL`) from the environment
    pub fn with_env_credentials(mut self) -> Result<Self> {
        let creds = OkexCredentials::from_env()?;
        self.api_key = creds.api_key;
        self.secret_key = creds.secret_key;
        self.passphrase = creds.passphrase;

        if let Ok(base_url) = std::env::var("OKEX_BASE_URL") {
            self.base_url = base_url;
        }
        Ok(self)
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_valid()
    }

    pub fn credentials(&self) -> OkexCredentials {
        OkexCredentials::new(
            self.api_key.clone(),
            self.secret_key.clone(),
            self.passphrase.clone(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        if self.timeout_ms == 0 {
            return Err(ExchangeError::ConfigurationError(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// `path?query` exactly as it is signed and sent
pub fn request_path(path: &str, query: Option<&QueryParams>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{path}?{}", query.to_query_string()),
        None => path.to_string(),
    }
}

/// Map a finished HTTP exchange to body bytes or a typed error
pub fn classify_response(response: HttpResponse) -> Result<Vec<u8>> {
    if response.is_success() {
        return Ok(response.body);
    }

    match ApiError::from_body(response.status, &response.body) {
        Some(api) => Err(ExchangeError::Api(api)),
        None => Err(ExchangeError::HttpError(response.status, response.body_text())),
    }
}

/// Signing HTTPS transport for the OKEx REST API
pub struct RestTransport {
    config: OkexConfig,
    base_url: Url,
    https_client: MonoioHttpsClient,
    signer: Option<OkexSigner>,
}

impl RestTransport {
    pub fn new(config: OkexConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)?;

        // Public endpoints still work without credentials
        let signer = if config.has_credentials() {
            Some(OkexSigner::new(config.credentials())?)
        } else {
            None
        };

        info!("🔗 OKEx REST transport created");
        info!("   Base URL: {}", base_url);
        info!("   Signed requests: {}", signer.is_some());

        Ok(Self {
            https_client: MonoioHttpsClient::new()?,
            config,
            base_url,
            signer,
        })
    }

    pub fn config(&self) -> &OkexConfig {
        &self.config
    }

    fn build_headers(
        &self,
        method: Method,
        request_path: &str,
        body: &str,
        signed: bool,
    ) -> Result<Vec<(&'static str, String)>> {
        let mut headers = vec![("Content-Type", "application/json".to_string())];

        if signed {
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::MissingCredentials("signed request without API credentials".to_string())
            })?;
            headers.extend(signer.auth_headers(Timestamp::now(), method.as_str(), request_path, body)?);
        }

        Ok(headers)
    }
}

#[async_trait(?Send)]
impl Transport for RestTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
        signed: bool,
    ) -> Result<Vec<u8>> {
        let timer = self
            .config
            .enable_timing
            .then(|| PerfTimer::start(format!("okex {method} {path}")));

        let request_path = request_path(path, query);
        let body_text = match body {
            Some(value) => serde_json::to_string(value)?,
            None => String::new(),
        };
        let headers = self.build_headers(method, &request_path, &body_text, signed)?;

        let url = self.base_url.join(&request_path)?;
        debug!("📡 {} {}{}", method, url, if signed { " (signed)" } else { "" });

        let payload = (!body_text.is_empty()).then_some(body_text.as_bytes());
        let call = self.https_client.request(method.as_str(), &url, payload, &headers);

        let response = monoio::time::timeout(Duration::from_millis(self.config.timeout_ms), call)
            .await
            .map_err(|_| {
                ExchangeError::Timeout(format!("{method} {path} after {}ms", self.config.timeout_ms))
            })??;

        if let Some(timer) = timer {
            timer.log_elapsed();
        }
        debug!("Response {}: {}", response.status, response.body_text());

        classify_response(response)
    }
}
