// server/src/web/handlers/auth_handlers.rs

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::extractors::{session_token, AuthenticatedUser, SESSION_COOKIE};

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct MagicLinkRequestPayload {
  pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct CallbackQuery {
  pub code: Option<String>,
}

fn session_cookie(value: String) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, value)
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish()
}

fn redirect_home() -> actix_web::HttpResponseBuilder {
  let mut response = HttpResponse::SeeOther();
  response.insert_header((header::LOCATION, "/"));
  response
}

// --- Handler Implementations ---

#[instrument(name = "handler::request_magic_link", skip(app_state, req_payload))]
pub async fn request_magic_link_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<MagicLinkRequestPayload>,
) -> Result<HttpResponse, AppError> {
  auth_service::request_magic_link(
    app_state.auth.as_ref(),
    &app_state.mailer,
    &app_state.config,
    &req_payload.email,
  )
  .await?;

  Ok(HttpResponse::Accepted().json(json!({
      "message": "Check your email for a sign-in link."
  })))
}

/// Exchanges the emailed code for a session. Always redirects home; failures are only logged.
#[instrument(name = "handler::auth_callback", skip(app_state, query_params))]
pub async fn auth_callback_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<CallbackQuery>,
) -> Result<HttpResponse, AppError> {
  let Some(code) = query_params.code.as_deref().filter(|c| !c.is_empty()) else {
    warn!("Auth callback without a code.");
    return Ok(redirect_home().finish());
  };

  match auth_service::exchange_code(app_state.auth.as_ref(), &app_state.config, code).await {
    Ok(Some((user, session_token))) => {
      info!(user_id = %user.id, "User signed in.");
      Ok(redirect_home().cookie(session_cookie(session_token.to_string())).finish())
    }
    Ok(None) => Ok(redirect_home().finish()),
    Err(e) => {
      warn!("Auth callback failed: {}", e);
      Ok(redirect_home().finish())
    }
  }
}

#[instrument(name = "handler::logout", skip(app_state, req))]
pub async fn logout_handler(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
  let ended = match session_token(&req) {
    Some(raw) => auth_service::end_session(app_state.auth.as_ref(), &raw).await?,
    None => false,
  };
  info!(ended, "Logout requested.");

  let mut removal = session_cookie(String::new());
  removal.make_removal();
  Ok(HttpResponse::Ok().cookie(removal).json(json!({
      "message": "Signed out."
  })))
}

#[instrument(name = "handler::me", skip(auth_user), fields(user_id = %auth_user.user.id))]
pub async fn me_handler(auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(json!({ "user": auth_user.user })))
}
