use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single live refresh token for a user. Saving a new one replaces the
/// previous record, so at most one session can be continued per user.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshToken {
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(user_id: &str, token_hash: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            token_hash: token_hash.to_string(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
