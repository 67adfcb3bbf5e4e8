use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id, decimal string per RFC 7519)
    pub iat: i64,    // Issued at (UTC timestamp)
    pub exp: i64,    // Expiration time (UTC timestamp)
}

impl Claims {
    /// `None` when `now + ttl` falls outside the representable time range.
    pub fn new(subject_id: i64, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
