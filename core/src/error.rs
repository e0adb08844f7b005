// core/src/error.rs
use crate::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShopError {
  /// A submitted form failed one or more field rules.
  #[error("{message}")]
  Validation { message: String, errors: FieldErrors },

  #[error("Invalid amount '{input}': {reason}")]
  InvalidAmount { input: String, reason: String },
}

impl ShopError {
  /// Builds a validation error carrying a single field message.
  pub fn field(message: impl Into<String>, field: &str, field_message: impl Into<String>) -> Self {
    let mut errors = FieldErrors::default();
    errors.push(field, field_message);
    ShopError::Validation {
      message: message.into(),
      errors,
    }
  }

  pub fn field_errors(&self) -> Option<&FieldErrors> {
    match self {
      ShopError::Validation { errors, .. } => Some(errors),
      ShopError::InvalidAmount { .. } => None,
    }
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
