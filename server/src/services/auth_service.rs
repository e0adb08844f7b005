// server/src/services/auth_service.rs

//! Magic-link authentication.
//!
//! A sign-in request issues a one-time login token and mails a link carrying
//! it. The callback exchanges that token for a session. Both credentials are
//! `<id>.<secret>` strings; only an argon2 hash of the secret is stored.

use crate::config::AppConfig;
use crate::db::AuthRepository;
use crate::errors::{AppError, Result};
use crate::models::{Credential, User};
use crate::services::email_mock::MockMailer;
use argon2::{
  password_hash::{
    rand_core::{OsRng, RngCore},
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
  },
  Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// A credential as handed to the client. The secret is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
  pub id: Uuid,
  pub secret: String,
}

impl fmt::Display for IssuedToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.id, self.secret)
  }
}

/// Splits `<id>.<secret>`. Returns `None` for anything malformed.
pub fn parse_token(raw: &str) -> Option<(Uuid, &str)> {
  let (id, secret) = raw.trim().split_once('.')?;
  if secret.is_empty() {
    return None;
  }
  Uuid::parse_str(id).ok().map(|id| (id, secret))
}

/// 24 random bytes, URL-safe base64 without padding.
pub fn generate_secret() -> String {
  let mut bytes = [0u8; 24];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

#[instrument(name = "auth_service::hash_secret", skip(secret), err(Display))]
pub fn hash_secret(secret: &str) -> Result<String> {
  if secret.is_empty() {
    return Err(AppError::Internal("Refusing to hash an empty secret.".to_string()));
  }
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 hashing failed.");
      AppError::Internal(format!("Secret hashing failed: {}", argon_err))
    })
}

/// Verifies a presented secret against its stored argon2 hash.
#[instrument(name = "auth_service::verify_secret", skip_all, err(Display))]
pub fn verify_secret(secret_hash: &str, secret: &str) -> Result<bool> {
  let parsed_hash = PasswordHash::new(secret_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored secret hash.");
    AppError::Internal(format!("Invalid stored secret hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(secret.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Secret verification failed: mismatch.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 verification encountered an error.");
      Err(AppError::Internal(format!(
        "Secret verification failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Lower-cases and sanity-checks an email address.
pub fn normalize_email(raw: &str) -> Result<String> {
  let email = raw.trim().to_lowercase();
  match email.split_once('@') {
    Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(email),
    _ => Err(AppError::BadRequest("A valid email address is required.".to_string())),
  }
}

fn issue(user_id: Uuid, ttl: Duration) -> Result<(Credential, IssuedToken)> {
  let ttl = chrono::Duration::from_std(ttl).map_err(|e| AppError::Config(format!("Credential TTL out of range: {}", e)))?;
  let token = IssuedToken {
    id: Uuid::new_v4(),
    secret: generate_secret(),
  };
  let credential = Credential {
    id: token.id,
    user_id,
    secret_hash: hash_secret(&token.secret)?,
    expires_at: Utc::now() + ttl,
  };
  Ok((credential, token))
}

fn magic_link(config: &AppConfig, token: &IssuedToken) -> String {
  format!("{}/auth/callback?code={}", config.app_base_url, token)
}

/// Creates the user on first use, stores a login token and mails the link.
#[instrument(name = "auth_service::request_magic_link", skip(auth, mailer, config, raw_email))]
pub async fn request_magic_link(
  auth: &dyn AuthRepository,
  mailer: &MockMailer,
  config: &AppConfig,
  raw_email: &str,
) -> Result<User> {
  let email = normalize_email(raw_email)?;
  let user = auth.upsert_user(&email).await?;

  let (credential, token) = issue(user.id, config.magic_link_ttl)?;
  auth.insert_login_token(credential).await?;

  let link = magic_link(config, &token);
  mailer
    .send(
      &user.email,
      "Your NexMart sign-in link",
      &format!(
        "<p>Click the link below to sign in to NexMart.</p><p><a href=\"{link}\">{link}</a></p>",
        link = link
      ),
    )
    .await?;

  info!(user_id = %user.id, "Magic link issued.");
  Ok(user)
}

/// Consumes a login code and opens a session. `Ok(None)` means the code was
/// malformed, unknown, expired or wrong.
#[instrument(name = "auth_service::exchange_code", skip(auth, config, code))]
pub async fn exchange_code(
  auth: &dyn AuthRepository,
  config: &AppConfig,
  code: &str,
) -> Result<Option<(User, IssuedToken)>> {
  let Some((token_id, secret)) = parse_token(code) else {
    warn!("Malformed login code.");
    return Ok(None);
  };

  // Taken before verification: a code is burned by its first use, right or wrong.
  let Some(login_token) = auth.take_login_token(token_id).await? else {
    warn!(%token_id, "Unknown or already used login code.");
    return Ok(None);
  };
  if login_token.is_expired_at(Utc::now()) {
    warn!(%token_id, "Expired login code.");
    return Ok(None);
  }
  if !verify_secret(&login_token.secret_hash, secret)? {
    warn!(%token_id, "Login code secret mismatch.");
    return Ok(None);
  }

  let Some(user) = auth.find_user(login_token.user_id).await? else {
    warn!(user_id = %login_token.user_id, "Login code refers to a missing user.");
    return Ok(None);
  };

  let (session, session_token) = issue(user.id, config.session_ttl)?;
  auth.insert_session(session).await?;
  info!(user_id = %user.id, session_id = %session_token.id, "Session opened.");
  Ok(Some((user, session_token)))
}

/// Resolves a presented session credential to its user.
pub async fn authenticate(auth: &dyn AuthRepository, raw: &str) -> Result<Option<(User, Uuid)>> {
  let Some((session_id, secret)) = parse_token(raw) else {
    return Ok(None);
  };
  let Some(session) = auth.find_session(session_id).await? else {
    return Ok(None);
  };
  if session.is_expired_at(Utc::now()) {
    debug!(%session_id, "Session expired; removing.");
    auth.delete_session(session_id).await?;
    return Ok(None);
  }
  if !verify_secret(&session.secret_hash, secret)? {
    return Ok(None);
  }
  Ok(auth.find_user(session.user_id).await?.map(|user| (user, session_id)))
}

/// Ends the session named by a presented credential. Returns whether one was removed.
pub async fn end_session(auth: &dyn AuthRepository, raw: &str) -> Result<bool> {
  match authenticate(auth, raw).await? {
    Some((_, session_id)) => auth.delete_session(session_id).await,
    None => Ok(false),
  }
}
