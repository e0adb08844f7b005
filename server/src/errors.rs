// server/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use nexmart::{FieldErrors, ShopError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Form input failed validation. Rendered as a form state the admin UI can show inline.
  #[error("Validation Error: {message}")]
  Validation { message: String, errors: FieldErrors },

  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storage Error: {0}")]
  Storage(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ShopError> for AppError {
  fn from(err: ShopError) -> Self {
    match err {
      ShopError::Validation { message, errors } => AppError::Validation { message, errors },
      other @ ShopError::InvalidAmount { .. } => AppError::BadRequest(other.to_string()),
    }
  }
}

// Storage backends report failures as anyhow errors with context attached.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(err) => AppError::Internal(format!("{:#}", err)),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Storage(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let body = match self {
      AppError::Validation { message, errors } => {
        tracing::warn!(application_error = %self, "Rejecting invalid form input");
        json!({"message": message, "errors": errors, "success": false})
      }
      AppError::BadRequest(m) | AppError::Auth(m) | AppError::Forbidden(m) | AppError::NotFound(m) => {
        json!({"error": m})
      }
      AppError::Conflict(m) => json!({"error": m, "success": false}),
      AppError::Config(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        json!({"error": "Configuration issue", "detail": m})
      }
      AppError::Sqlx(e) => {
        tracing::error!(db_error = %e, "Responding with database error");
        json!({"error": "Database operation failed"})
      }
      AppError::Storage(m) => {
        tracing::error!(application_error = %self, "Responding with storage error");
        json!({"error": format!("Storage Error: {}", m), "success": false})
      }
      AppError::Internal(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        json!({"error": "An internal error occurred", "detail": m})
      }
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
