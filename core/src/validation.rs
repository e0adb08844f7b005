// core/src/validation.rs

//! Validation of the admin product form.
//!
//! The form arrives as loosely typed text fields plus an optional uploaded
//! image. `ProductForm::validate_create` and `ProductForm::validate_update`
//! collect every failing rule into `FieldErrors` so the admin UI can show all
//! problems at once.

use crate::error::{ShopError, ShopResult};
use crate::money::Money;
use crate::product::ProductDraft;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

pub const VALIDATION_FAILED: &str = "Validation failed. Please check your entries.";
pub const IMAGE_REQUIRED: &str = "Product image is required.";

const MIN_TEXT_LEN: usize = 3;

/// Messages per form field, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn push(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_string()).or_default().push(message.into());
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn contains(&self, field: &str) -> bool {
    self.0.contains_key(field)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }
}

/// An uploaded image file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
  pub file_name: String,
  pub content_type: String,
  pub bytes: Vec<u8>,
}

impl ImageUpload {
  /// Extension of the original file name, without the dot.
  pub fn extension(&self) -> Option<&str> {
    self
      .file_name
      .rsplit_once('.')
      .map(|(_, ext)| ext)
      .filter(|ext| !ext.is_empty())
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

/// Raw admin form input. Unknown fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
  pub name: Option<String>,
  pub slug: Option<String>,
  pub description: Option<String>,
  pub category: Option<String>,
  pub price: Option<String>,
  pub inventory: Option<String>,
  pub image: Option<ImageUpload>,
}

impl ProductForm {
  /// Assigns a text field by its form name. Returns `false` for unknown names.
  pub fn set_text(&mut self, field: &str, value: String) -> bool {
    let slot = match field {
      "name" => &mut self.name,
      "slug" => &mut self.slug,
      "description" => &mut self.description,
      "category" => &mut self.category,
      "price" => &mut self.price,
      "inventory" => &mut self.inventory,
      _ => return false,
    };
    *slot = Some(value);
    true
  }

  /// Validates a new product. An image is mandatory.
  pub fn validate_create(self) -> ShopResult<ValidatedProduct> {
    self.validate(true)
  }

  /// Validates an edit. The image is optional; without one the stored image is kept.
  pub fn validate_update(self) -> ShopResult<ValidatedProduct> {
    self.validate(false)
  }

  fn validate(self, image_required: bool) -> ShopResult<ValidatedProduct> {
    let mut errors = FieldErrors::default();

    let name = required_text(self.name, "name", "Name must be at least 3 characters", &mut errors);
    let slug = required_text(self.slug, "slug", "Slug must be at least 3 characters", &mut errors);

    let price = match parse_price(self.price.as_deref()) {
      Ok(price) => Some(price),
      Err(message) => {
        errors.push("price", message);
        None
      }
    };

    let inventory = match parse_inventory(self.inventory.as_deref()) {
      Ok(units) => Some(units),
      Err(message) => {
        errors.push("inventory", message);
        None
      }
    };

    // A zero-length file part means "no new image".
    let image = self.image.filter(|image| !image.is_empty());
    if let Some(image) = &image {
      if image.len() > MAX_IMAGE_BYTES {
        errors.push("image", "Max image size is 5MB.");
      }
      if !ACCEPTED_IMAGE_TYPES.contains(&image.content_type.to_ascii_lowercase().as_str()) {
        errors.push("image", "Only .jpg, .jpeg, .png and .webp formats are supported.");
      }
    }

    let missing_image = image_required && image.is_none();
    if missing_image {
      errors.push("image", IMAGE_REQUIRED);
    }

    match (name, slug, price, inventory) {
      (Some(name), Some(slug), Some(price), Some(inventory)) if errors.is_empty() => Ok(ValidatedProduct {
        name,
        slug,
        description: optional_text(self.description),
        category: optional_text(self.category),
        price,
        inventory,
        image,
      }),
      _ => Err(ShopError::Validation {
        message: if missing_image { IMAGE_REQUIRED } else { VALIDATION_FAILED }.to_string(),
        errors,
      }),
    }
  }
}

/// Form input that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProduct {
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub category: Option<String>,
  pub price: Money,
  pub inventory: i32,
  pub image: Option<ImageUpload>,
}

impl ValidatedProduct {
  /// Splits off the uploaded image. The draft's `image_url` is left unset for
  /// the caller to fill in once the image is stored.
  pub fn into_parts(self) -> (ProductDraft, Option<ImageUpload>) {
    let draft = ProductDraft {
      name: self.name,
      slug: self.slug,
      description: self.description,
      price: self.price,
      category: self.category,
      inventory: self.inventory,
      image_url: None,
    };
    (draft, self.image)
  }
}

/// Blank or absent counts as zero. Numbers at or below zero are "not greater
/// than 0"; anything else that is not a cents amount is "not a number".
fn parse_price(raw: Option<&str>) -> Result<Money, &'static str> {
  const NOT_POSITIVE: &str = "Price must be greater than 0";
  let raw = raw.map(str::trim).unwrap_or_default();
  if raw.is_empty() {
    return Err(NOT_POSITIVE);
  }
  match Money::parse(raw) {
    Ok(price) if price.cents() >= 1 => Ok(price),
    Ok(_) => Err(NOT_POSITIVE),
    Err(_) => match raw.parse::<f64>() {
      Ok(value) if value.is_finite() && value <= 0.0 => Err(NOT_POSITIVE),
      _ => Err("Price must be a number"),
    },
  }
}

/// Blank or absent counts as zero. Integral decimals such as `"5.0"` are accepted.
fn parse_inventory(raw: Option<&str>) -> Result<i32, &'static str> {
  const NOT_WHOLE: &str = "Inventory must be a whole number";
  let raw = raw.map(str::trim).unwrap_or_default();
  if raw.is_empty() {
    return Ok(0);
  }
  if let Ok(units) = raw.parse::<i32>() {
    return if units >= 0 { Ok(units) } else { Err("Inventory cannot be negative") };
  }
  match raw.parse::<f64>() {
    Ok(value) if !value.is_finite() || value.fract() != 0.0 => Err(NOT_WHOLE),
    Ok(value) if value < 0.0 => Err("Inventory cannot be negative"),
    Ok(value) if value <= i32::MAX as f64 => Ok(value as i32),
    _ => Err(NOT_WHOLE),
  }
}

fn required_text(value: Option<String>, field: &str, message: &str, errors: &mut FieldErrors) -> Option<String> {
  let trimmed = value.map(|v| v.trim().to_string()).unwrap_or_default();
  if trimmed.chars().count() < MIN_TEXT_LEN {
    errors.push(field, message);
    return None;
  }
  Some(trimmed)
}

fn optional_text(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
