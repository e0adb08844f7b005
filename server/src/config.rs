// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Absent means the in-memory backend is used.
  pub database_url: Option<String>,
  pub app_base_url: String,

  /// Directory the local image store writes product images into.
  pub image_dir: PathBuf,

  pub mock_email_sender: String,

  pub magic_link_ttl: Duration,
  pub session_ttl: Duration,
  pub cart_idle_ttl: Duration,
  pub cart_sweep_interval: Duration,
  /// How often expired login tokens and sessions are purged.
  pub credential_sweep_interval: Duration,

  pub low_stock_threshold: i32,
  /// Lower-cased allowlist for admin routes. Empty means any signed-in user.
  pub admin_emails: Vec<String>,

  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    let server_host = "127.0.0.1".to_string();
    let server_port = 8080;
    Self {
      app_base_url: format!("http://{}:{}", server_host, server_port),
      server_host,
      server_port,
      database_url: None,
      image_dir: PathBuf::from("./uploads/product-images"),
      mock_email_sender: "noreply@nexmart.example".to_string(),
      magic_link_ttl: Duration::from_secs(15 * 60),
      session_ttl: Duration::from_secs(7 * 24 * 60 * 60),
      cart_idle_ttl: Duration::from_secs(24 * 60 * 60),
      cart_sweep_interval: Duration::from_secs(5 * 60),
      credential_sweep_interval: Duration::from_secs(15 * 60),
      low_stock_threshold: nexmart::DEFAULT_LOW_STOCK_THRESHOLD,
      admin_emails: Vec::new(),
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let defaults = Self::default();

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_env("SERVER_PORT", defaults.server_port)?;
    let database_url = get_env("DATABASE_URL").filter(|url| !url.trim().is_empty());
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|| format!("http://{}:{}", server_host, server_port));
    let image_dir = get_env("IMAGE_DIR").map(PathBuf::from).unwrap_or(defaults.image_dir);
    let mock_email_sender = get_env("MOCK_EMAIL_SENDER").unwrap_or(defaults.mock_email_sender);

    let magic_link_ttl = parse_secs("MAGIC_LINK_TTL_SECS", defaults.magic_link_ttl)?;
    let session_ttl = parse_secs("SESSION_TTL_SECS", defaults.session_ttl)?;
    let cart_idle_ttl = parse_secs("CART_IDLE_TTL_SECS", defaults.cart_idle_ttl)?;
    let cart_sweep_interval = parse_secs("CART_SWEEP_INTERVAL_SECS", defaults.cart_sweep_interval)?;
    if cart_sweep_interval.is_zero() {
      return Err(AppError::Config("CART_SWEEP_INTERVAL_SECS must be greater than 0".to_string()));
    }
    let credential_sweep_interval =
      parse_secs("CREDENTIAL_SWEEP_INTERVAL_SECS", defaults.credential_sweep_interval)?;
    if credential_sweep_interval.is_zero() {
      return Err(AppError::Config(
        "CREDENTIAL_SWEEP_INTERVAL_SECS must be greater than 0".to_string(),
      ));
    }

    let low_stock_threshold = parse_env("LOW_STOCK_THRESHOLD", defaults.low_stock_threshold)?;
    let admin_emails: Vec<String> = get_env("ADMIN_EMAILS")
      .map(|raw| {
        raw
          .split(',')
          .map(|email| email.trim().to_lowercase())
          .filter(|email| !email.is_empty())
          .collect()
      })
      .unwrap_or_default();

    let seed_db = parse_env("SEED_DB", defaults.seed_db)?;

    tracing::info!(
      in_memory_backend = database_url.is_none(),
      admin_allowlist = admin_emails.len(),
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url: app_base_url.trim_end_matches('/').to_string(),
      image_dir,
      mock_email_sender,
      magic_link_ttl,
      session_ttl,
      cart_idle_ttl,
      cart_sweep_interval,
      credential_sweep_interval,
      low_stock_threshold,
      admin_emails,
      seed_db,
    })
  }

  pub fn is_admin_email(&self, email: &str) -> bool {
    self.admin_emails.is_empty() || self.admin_emails.iter().any(|allowed| allowed.eq_ignore_ascii_case(email))
  }
}

fn get_env(var_name: &str) -> Option<String> {
  env::var(var_name).ok()
}

fn parse_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match get_env(var_name) {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    None => Ok(default),
  }
}

fn parse_secs(var_name: &str, default: Duration) -> Result<Duration> {
  parse_env(var_name, default.as_secs()).map(Duration::from_secs)
}
