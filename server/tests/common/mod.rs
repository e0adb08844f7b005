// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use nexmart_server::config::AppConfig;
use nexmart_server::services::{auth_service, MemoryImageStore};
use nexmart_server::state::AppState;
use nexmart_server::web::extractors::SESSION_COOKIE;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

pub const BASE_URL: &str = "http://localhost:8080";
pub const BOUNDARY: &str = "----nexmart-test-boundary";

/// Builds the actix test service for a state.
#[allow(unused_macros)]
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(nexmart_server::web::configure_app_routes),
    )
    .await
  };
}

pub fn test_config() -> AppConfig {
  AppConfig {
    app_base_url: BASE_URL.to_string(),
    ..AppConfig::default()
  }
}

/// Fully in-memory state. The image store is returned too so tests can inspect it.
pub fn test_state_with(config: AppConfig) -> (AppState, Arc<MemoryImageStore>) {
  let images = Arc::new(MemoryImageStore::new());
  let state = AppState::with_images(Arc::new(config), images.clone());
  (state, images)
}

pub fn test_state() -> (AppState, Arc<MemoryImageStore>) {
  test_state_with(test_config())
}

pub async fn seeded_state() -> AppState {
  let (state, _) = test_state();
  nexmart_server::seed::seed_products(state.products.as_ref()).await.unwrap();
  state
}

/// Pulls `<id>.<secret>` out of a magic-link email body.
pub fn code_from_email(html_body: &str) -> String {
  let start = html_body.find("code=").expect("email carries a code") + "code=".len();
  html_body[start..]
    .chars()
    .take_while(|c| *c != '"' && *c != '<')
    .collect()
}

/// Signs `email` in through the mailer and returns the session cookie.
pub async fn sign_in(state: &AppState, email: &str) -> Cookie<'static> {
  auth_service::request_magic_link(state.auth.as_ref(), &state.mailer, &state.config, email)
    .await
    .unwrap();
  let mail = state.mailer.last_sent_to(email).unwrap();
  let (_, token) = auth_service::exchange_code(state.auth.as_ref(), &state.config, &code_from_email(&mail.html_body))
    .await
    .unwrap()
    .unwrap();
  Cookie::new(SESSION_COOKIE, token.to_string())
}

pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
  resp.response().cookies().find(|c| c.name() == name).map(|c| c.into_owned())
}

// --- Multipart bodies ---

pub struct ImagePart<'a> {
  pub file_name: &'a str,
  pub content_type: &'a str,
  pub bytes: &'a [u8],
}

pub fn png(file_name: &str) -> ImagePart<'_> {
  ImagePart {
    file_name,
    content_type: "image/png",
    bytes: b"\x89PNG\r\n\x1a\nfake-image-bytes",
  }
}

pub fn multipart_content_type() -> String {
  format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn multipart_body(fields: &[(&str, &str)], image: Option<ImagePart<'_>>) -> Vec<u8> {
  let mut body = Vec::new();
  for (name, value) in fields {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
  }
  if let Some(image) = image {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
      format!(
        "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        image.file_name, image.content_type
      )
      .as_bytes(),
    );
    body.extend_from_slice(image.bytes);
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
  body
}

/// Text fields of a valid product form.
pub fn product_fields<'a>(name: &'a str, slug: &'a str, price: &'a str, inventory: &'a str) -> Vec<(&'a str, &'a str)> {
  vec![
    ("name", name),
    ("slug", slug),
    ("description", "A test product."),
    ("category", "Testing"),
    ("price", price),
    ("inventory", inventory),
  ]
}

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
