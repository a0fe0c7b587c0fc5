//! API token generation, parsing and hashing.
//!
//! Tokens look like `sf_<64 hex chars>`. Only the SHA-256 digest of the whole token string is
//! persisted, so a leaked database does not leak usable tokens.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// API token prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(secret: &ApiTokenSecret) -> String {
    let mut token = String::with_capacity(API_TOKEN_PREFIX.len() + 1 + API_TOKEN_SECRET_HEX_CHARS);

    token.push_str(API_TOKEN_PREFIX);
    token.push('_');

    for byte in secret.as_bytes() {
        for nibble in [byte >> 4, byte & 0x0f] {
            if let Some(digit) = HEX_DIGITS.get(usize::from(nibble)) {
                token.push(char::from(*digit));
            }
        }
    }

    token
}

/// Parses a raw bearer token into its secret.
///
/// # Errors
///
/// Returns [`ApiTokenError::InvalidFormat`] when the prefix is wrong and
/// [`ApiTokenError::InvalidSecretEncoding`] when the secret is not 64 hex characters.
pub fn parse_api_token(token: &str) -> Result<ApiTokenSecret, ApiTokenError> {
    let (prefix, secret_hex) = token.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS || !secret_hex.is_ascii() {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let pair =
            std::str::from_utf8(pair).map_err(|_error| ApiTokenError::InvalidSecretEncoding)?;

        *byte = u8::from_str_radix(pair, 16)
            .map_err(|_error| ApiTokenError::InvalidSecretEncoding)?;
    }

    Ok(ApiTokenSecret::from_bytes(secret))
}

/// SHA-256 digest of a raw token, hex encoded. This is what gets stored.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
