//! Client order id generation
//!
//! The exchange accepts a caller-chosen `client_oid` on every order. It must
//! start with a letter, contain only ASCII letters and digits, and be at most
//! 32 characters long. Ids here are a short prefix plus a nanoid body drawn
//! from an alphanumeric alphabet.

use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Longest `client_oid` the exchange accepts
pub const CLIENT_OID_MAX_LEN: usize = 32;

const ALPHANUMERIC: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

const DEFAULT_PREFIX: &str = "oks";

/// Validated client order id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientOid(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientOidError {
    #[error("client_oid is empty")]
    Empty,
    #[error("client_oid longer than {CLIENT_OID_MAX_LEN} characters: {0}")]
    TooLong(String),
    #[error("client_oid must start with a letter: {0}")]
    LeadingNonLetter(String),
    #[error("client_oid must be alphanumeric: {0}")]
    NotAlphanumeric(String),
}

impl ClientOid {
    /// Fresh id with the default prefix
    pub fn generate() -> Self {
        Self(generate_client_oid(DEFAULT_PREFIX))
    }

    /// Fresh id with a caller prefix; the prefix itself must be a valid id
    pub fn with_prefix(prefix: &str) -> Result<Self, ClientOidError> {
        validate_client_oid(prefix)?;
        Ok(Self(generate_client_oid(prefix)))
    }

    /// Validate an id chosen elsewhere
    pub fn parse(value: impl Into<String>) -> Result<Self, ClientOidError> {
        let value = value.into();
        validate_client_oid(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for ClientOid {
    fn default() -> Self {
        Self::generate()
    }
}

impl Display for ClientOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClientOid {
    type Error = ClientOidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClientOid::parse(value)
    }
}

impl From<ClientOid> for String {
    fn from(id: ClientOid) -> Self {
        id.0
    }
}

pub fn validate_client_oid(value: &str) -> Result<(), ClientOidError> {
    let first = value.chars().next().ok_or(ClientOidError::Empty)?;
    if value.len() > CLIENT_OID_MAX_LEN {
        return Err(ClientOidError::TooLong(value.to_string()));
    }
    if !first.is_ascii_alphabetic() {
        return Err(ClientOidError::LeadingNonLetter(value.to_string()));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ClientOidError::NotAlphanumeric(value.to_string()));
    }
    Ok(())
}

/// Alphanumeric nanoid of the given length
pub fn generate_id_with_length(length: usize) -> String {
    nanoid!(length, &ALPHANUMERIC)
}

/// `prefix` followed by random characters up to the 32 character limit.
/// A prefix that already fills the limit is truncated to it.
pub fn generate_client_oid(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(CLIENT_OID_MAX_LEN).collect();
    let remaining = CLIENT_OID_MAX_LEN.saturating_sub(prefix.len());
    if remaining == 0 {
        return prefix;
    }
    format!("{prefix}{}", generate_id_with_length(remaining))
}
