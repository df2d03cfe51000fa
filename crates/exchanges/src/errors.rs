//! Exchange error types
//!
//! Two kinds of failure reach callers of the order endpoints:
//!
//! - [`ExchangeError::Api`]: the exchange answered with a structured error.
//!   It is returned exactly as the transport produced it.
//! - [`ExchangeError::Wrapped`]: anything else (network, HTTP, signing,
//!   decoding) annotated with the operation that was running.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Result type for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Exchange operation errors
#[derive(Error, Debug, Clone)]
pub enum ExchangeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{context}: {source}")]
    Wrapped {
        context: &'static str,
        source: Box<ExchangeError>,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Fixed point error: {0}")]
    FixedPointError(String),
}

impl ExchangeError {
    /// Annotate a non-API error with operation context.
    /// Structured API errors pass through unchanged.
    pub fn wrap(self, context: &'static str) -> Self {
        match self {
            ExchangeError::Api(_) => self,
            other => ExchangeError::Wrapped {
                context,
                source: Box::new(other),
            },
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ExchangeError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_api_error(&self) -> bool {
        self.api_error().is_some()
    }

    /// Outermost context message, if the error was wrapped
    pub fn context(&self) -> Option<&'static str> {
        match self {
            ExchangeError::Wrapped { context, .. } => Some(*context),
            _ => None,
        }
    }

    /// Innermost error beneath any context layers
    pub fn root_cause(&self) -> &ExchangeError {
        let mut current = self;
        while let ExchangeError::Wrapped { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<url::ParseError> for ExchangeError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Structured error reported by the exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("OKEx API error {code} (HTTP {status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub code: i64,
    pub message: String,
}

/// Both error body spellings the v3 API uses:
/// `{"code":30008,"message":"..."}` and `{"error_code":"33014","error_message":"..."}`
#[derive(Deserialize)]
struct RawApiError {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    error_code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

fn code_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl ApiError {
    pub fn new(status: u16, code: i64, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Decode an error body; `None` if it carries no non-zero error code
    pub fn from_body(status: u16, body: &[u8]) -> Option<Self> {
        let raw: RawApiError = serde_json::from_slice(body).ok()?;

        let code = raw
            .error_code
            .as_ref()
            .and_then(code_from_value)
            .or_else(|| raw.code.as_ref().and_then(code_from_value))
            .filter(|code| *code != 0)?;

        let message = raw
            .error_message
            .filter(|m| !m.is_empty())
            .or(raw.message)
            .or(raw.msg)
            .unwrap_or_default();

        Some(Self::new(status, code, message))
    }

    pub fn kind(&self) -> ApiErrorKind {
        ApiErrorKind::from(self.code)
    }
}

/// Coarse classification of exchange error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Authentication,
    RateLimited,
    InvalidParameter,
    OrderNotFound,
    InsufficientBalance,
    InstrumentSuspended,
    ServiceUnavailable,
    Other,
}

impl From<i64> for ApiErrorKind {
    fn from(code: i64) -> Self {
        match code {
            // Missing or invalid OK-ACCESS-* headers, expired timestamp, bad sign
            30001..=30013 | 30015 => ApiErrorKind::Authentication,
            30014 | 30026 => ApiErrorKind::RateLimited,
            30023..=30025 => ApiErrorKind::InvalidParameter,
            30030 => ApiErrorKind::ServiceUnavailable,
            30032 => ApiErrorKind::InstrumentSuspended,
            33014 => ApiErrorKind::OrderNotFound,
            33017 => ApiErrorKind::InsufficientBalance,
            _ => ApiErrorKind::Other,
        }
    }
}
