//! Signed session tokens (HS256 JWT)

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sso_shared::constants::{GENERATED_SECRET_BYTES, MIN_SECRET_LENGTH};
use sso_shared::UserRole;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token, bad signature and foreign secret are deliberately the same error.
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token creation failed: {0}")]
    Creation(String),
    #[error("Signing secret must be at least {min} bytes")]
    WeakSecret { min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token together with the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Process-wide HMAC key. Read-only once constructed.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
    generated: bool,
}

impl SigningSecret {
    pub fn from_value(value: &str) -> Result<Self, TokenError> {
        if value.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LENGTH,
            });
        }
        Ok(Self {
            bytes: value.as_bytes().to_vec(),
            generated: false,
        })
    }

    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_SECRET_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            bytes,
            generated: true,
        }
    }

    /// Uses the external value when present, otherwise generates one.
    pub fn resolve(value: Option<&str>) -> Result<Self, TokenError> {
        match value {
            Some(value) => Self::from_value(value),
            None => {
                warn!("No signing secret configured; generated one for this process. Tokens will not survive a restart");
                Ok(Self::generate())
            }
        }
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.bytes.len())
            .field("generated", &self.generated)
            .finish()
    }
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: &SigningSecret, expiry: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(&secret.bytes),
            decoding_key: DecodingKey::from_secret(&secret.bytes),
            validation,
            expiry,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Stamps `iat`/`exp` and signs. The expiry lives inside the signed payload.
    pub fn issue(&self, subject: &str, role: UserRole) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| TokenError::Creation("token expiry out of range".into()))?;
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    /// The signature is checked before any claim, so a stale token with a bad
    /// signature is `InvalidToken`, never `TokenExpired`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })
    }
}
