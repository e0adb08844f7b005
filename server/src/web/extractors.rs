// server/src/web/extractors.rs

//! Request extractors for the visitor's cart session and the signed-in user.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponseBuilder};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use nexmart::{Cart, CartStore};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::User;
use crate::services::auth_service;
use crate::state::AppState;

pub const CART_COOKIE: &str = "nexmart_cart";
pub const SESSION_COOKIE: &str = "nexmart_session";

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
  req
    .app_data::<web::Data<AppState>>()
    .cloned()
    .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))
}

/// The visitor's cart. A cart session is started when the request carries no
/// valid `nexmart_cart` cookie; `attach_cookie` then hands the new id back.
pub struct CartSession {
  pub id: Uuid,
  pub store: CartStore,
  pub is_new: bool,
}

impl CartSession {
  pub fn attach_cookie(&self, response: &mut HttpResponseBuilder) {
    if self.is_new {
      response.cookie(
        Cookie::build(CART_COOKIE, self.id.to_string())
          .path("/")
          .http_only(true)
          .same_site(SameSite::Lax)
          .finish(),
      );
    }
  }
}

impl FromRequest for CartSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = match app_state(req) {
      Ok(state) => state,
      Err(e) => return ready(Err(e)),
    };
    let existing = req.cookie(CART_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok());
    let (id, is_new) = match existing {
      Some(id) => (id, false),
      None => (Uuid::new_v4(), true),
    };
    let store = state.carts.open(id);
    ready(Ok(CartSession { id, store, is_new }))
  }
}

/// A read-only view of the visitor's cart. Never starts a cart session: a
/// request without a live session sees an empty cart and gets no cookie.
pub struct CartSnapshot {
  pub id: Option<Uuid>,
  pub cart: Cart,
}

impl FromRequest for CartSnapshot {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = match app_state(req) {
      Ok(state) => state,
      Err(e) => return ready(Err(e)),
    };
    let id = req.cookie(CART_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok());
    let store = id.and_then(|id| state.carts.get(id));
    let cart = store.map(|store| store.snapshot()).unwrap_or_default();
    ready(Ok(CartSnapshot { id, cart }))
  }
}

/// The raw `<id>.<secret>` session token: the `nexmart_session` cookie, or
/// an `Authorization: Bearer` header when the cookie is absent.
pub fn session_token(req: &HttpRequest) -> Option<String> {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    return Some(cookie.value().to_string());
  }
  req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .map(|token| token.trim().to_string())
    .filter(|token| !token.is_empty())
}

/// A user with a valid session token (cookie or bearer header).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user: User,
  pub session_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = app_state(req);
    let raw = session_token(req);
    Box::pin(async move {
      let state = state?;
      let Some(raw) = raw else {
        return Err(AppError::Auth("Sign in required.".to_string()));
      };
      match auth_service::authenticate(state.auth.as_ref(), &raw).await? {
        Some((user, session_id)) => Ok(AuthenticatedUser { user, session_id }),
        None => {
          warn!("AuthenticatedUser extractor: invalid or expired session token.");
          Err(AppError::Auth("Session is invalid or has expired.".to_string()))
        }
      }
    })
  }
}

/// A signed-in user allowed into the admin area.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
    let state = app_state(req);
    let authenticated = AuthenticatedUser::from_request(req, payload);
    Box::pin(async move {
      let state = state?;
      let AuthenticatedUser { user, .. } = authenticated.await?;
      if !state.config.is_admin_email(&user.email) {
        warn!(user_id = %user.id, "Admin access denied.");
        return Err(AppError::Forbidden("Admin access required.".to_string()));
      }
      Ok(AdminUser(user))
    })
  }
}
