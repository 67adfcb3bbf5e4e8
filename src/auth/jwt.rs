use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::auth::claims::Claims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token has expired")]
    Expired,

    #[error("token is malformed or its signature does not verify")]
    Malformed,
}

/// Issues and verifies HS256 bearer tokens carrying a user id.
///
/// Expiry is checked against an explicit `now` rather than the system clock
/// inside `jsonwebtoken`, so verification has no leeway and can be exercised
/// deterministically.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &SecretString, ttl: Duration) -> Result<Self, TokenError> {
        let secret_bytes = secret.expose_secret().as_bytes();
        if secret_bytes.is_empty() {
            return Err(TokenError::Signing("signing secret is not configured".to_string()));
        }
        if Utc::now().checked_add_signed(ttl).is_none() {
            return Err(TokenError::Signing(format!("token lifetime {} is out of range", ttl)));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(
        &self,
        subject_id: i64,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject_id, now, ttl)
            .ok_or_else(|| TokenError::Signing(format!("token lifetime {} is out of range", ttl)))?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<i64, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("token rejected: {}", e);
                TokenError::Malformed
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        claims.subject_id().ok_or(TokenError::Malformed)
    }

    /// Issues a token for `subject_id` valid for the configured TTL from now.
    pub fn create_token(&self, subject_id: i64) -> Result<String, TokenError> {
        self.issue(subject_id, Utc::now(), self.ttl)
    }

    pub fn validate_token(&self, token: &str) -> Result<i64, TokenError> {
        self.verify(token, Utc::now())
    }
}
