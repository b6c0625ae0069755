//! JWT token issuance and validation
//! HS256, stateless: the signing key is derived once at startup and never
//! rotated for the process lifetime.

use crate::{config::AppConfig, error::AppError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HS256 requires at least 32 bytes of key material
const MIN_KEY_LEN: usize = 32;

/// Token validation failure.
///
/// Never surfaced to HTTP clients as-is: the request authorizer absorbs
/// every variant into an anonymous request and the access policy decides
/// the visible 401/403.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Not parseable into three well-formed JWT segments
    #[error("malformed token")]
    Malformed,

    /// MAC mismatch: tampering or wrong key
    #[error("invalid signature")]
    InvalidSignature,

    /// Past its expiry instant
    #[error("token expired")]
    Expired,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (epoch seconds)
    pub iat: i64,

    /// Expiration (epoch seconds)
    pub exp: i64,
}

/// JWT service
///
/// Holds only the immutable keys after construction, so `issue`/`verify`
/// are safe to call concurrently without locking.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_ms: u64,
}

impl JwtService {
    /// Derive the signing key and build the service.
    ///
    /// If the secret is valid standard Base64 it is decoded and the raw
    /// bytes are used as key material; otherwise the UTF-8 bytes of the
    /// string itself are used. A key shorter than 32 bytes is a fatal
    /// configuration error: the process must not start serving requests.
    pub fn new(secret: &str, token_ttl_ms: u64) -> Result<Self, AppError> {
        let key_bytes = match BASE64.decode(secret) {
            Ok(decoded) => decoded,
            Err(_) => secret.as_bytes().to_vec(),
        };

        if key_bytes.len() < MIN_KEY_LEN {
            return Err(AppError::Config(format!(
                "JWT signing key too short: {} bytes (min {} for HS256)",
                key_bytes.len(),
                MIN_KEY_LEN
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&key_bytes),
            decoding_key: DecodingKey::from_secret(&key_bytes),
            token_ttl_ms,
        })
    }

    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config.security.jwt_secret.expose_secret(), config.security.token_ttl_ms)
    }

    /// Issue a signed token binding the given username.
    ///
    /// Claims carry only `{sub, iat, exp}` — roles are deliberately not
    /// embedded, the authorizer re-reads them from the user store on every
    /// request so role changes take effect immediately.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = now + Duration::milliseconds(self.token_ttl_ms as i64);

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify a token and return its subject (username).
    ///
    /// Signature is checked before claims, with zero expiry leeway.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        Ok(data.claims.sub)
    }
}
