// server/src/models/credential.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A hashed bearer secret bound to a user: either a one-time magic-link login
/// token or a signed-in session. Clients present `<id>.<secret>`; only the
/// argon2 hash of the secret is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Credential {
  pub id: Uuid,
  pub user_id: Uuid,
  pub secret_hash: String,
  pub expires_at: DateTime<Utc>,
}

impl Credential {
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }
}
