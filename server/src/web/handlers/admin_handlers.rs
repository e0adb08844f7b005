// server/src/web/handlers/admin_handlers.rs

//! Product management for admins. Create and update take `multipart/form-data`
//! with the text fields of `ProductForm` plus an optional `image` file part.

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use nexmart::validation::MAX_IMAGE_BYTES;
use nexmart::{ImageUpload, ProductForm};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::image_store;
use crate::state::AppState;
use crate::web::extractors::AdminUser;

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Reads a part, keeping at most `limit + 1` bytes so oversize input stays detectable.
async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, AppError> {
  let mut bytes = Vec::new();
  while let Some(chunk) = field
    .try_next()
    .await
    .map_err(|e| AppError::BadRequest(format!("Malformed form data: {}", e)))?
  {
    let room = (limit + 1).saturating_sub(bytes.len());
    bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
  }
  Ok(bytes)
}

async fn read_product_form(mut payload: Multipart) -> Result<ProductForm, AppError> {
  let mut form = ProductForm::default();
  while let Some(mut field) = payload
    .try_next()
    .await
    .map_err(|e| AppError::BadRequest(format!("Malformed form data: {}", e)))?
  {
    let name = field.name().unwrap_or_default().to_string();
    if name == "image" {
      let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();
      let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();
      let bytes = read_field(&mut field, MAX_IMAGE_BYTES).await?;
      form.image = Some(ImageUpload {
        file_name,
        content_type,
        bytes,
      });
      continue;
    }

    let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES).await?;
    if bytes.len() > MAX_TEXT_FIELD_BYTES {
      return Err(AppError::BadRequest(format!("Form field '{}' is too large.", name)));
    }
    let value = String::from_utf8(bytes)
      .map_err(|_| AppError::BadRequest(format!("Form field '{}' is not valid UTF-8.", name)))?;
    if !form.set_text(&name, value) {
      warn!("Ignoring unknown form field '{}'.", name);
    }
  }
  Ok(form)
}

/// Name of an image this server stored, or `None` for external URLs.
fn owned_image_name<'a>(config: &AppConfig, url: &'a str) -> Option<&'a str> {
  let prefix = image_store::public_url(&config.app_base_url, "");
  url.strip_prefix(prefix.as_str()).and_then(image_store::name_from_url)
}

async fn discard_image(app_state: &AppState, name: &str) {
  if let Err(e) = app_state.images.remove(name).await {
    warn!("Failed to remove image '{}': {}", name, e);
  }
}

#[instrument(name = "handler::admin_list_products", skip(app_state, admin), fields(admin = %admin.0.email))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let products = app_state.products.list_by_name().await?;
  Ok(HttpResponse::Ok().json(json!({ "products": products })))
}

#[instrument(name = "handler::admin_get_product", skip(app_state, path, _admin), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .products
    .find_by_id(path.into_inner())
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found.".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({ "product": product })))
}

#[instrument(name = "handler::admin_create_product", skip(app_state, payload, admin), fields(admin = %admin.0.email))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: Multipart,
  admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let validated = read_product_form(payload).await?.validate_create()?;
  let (mut draft, image) = validated.into_parts();
  let image = image.ok_or_else(|| AppError::BadRequest(nexmart::validation::IMAGE_REQUIRED.to_string()))?;

  let image_name = app_state.images.upload(&image).await?;
  draft.image_url = Some(image_store::public_url(&app_state.config.app_base_url, &image_name));

  match app_state.products.insert(draft).await {
    Ok(product) => {
      info!(product_id = %product.id, slug = %product.slug, "Product created.");
      Ok(HttpResponse::Created().json(json!({
          "message": "Product created successfully!",
          "success": true,
          "product": product
      })))
    }
    Err(e) => {
      warn!("Product insert failed; removing uploaded image '{}'.", image_name);
      discard_image(&app_state, &image_name).await;
      Err(e)
    }
  }
}

#[instrument(name = "handler::admin_update_product", skip(app_state, path, payload, _admin), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: Multipart,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let existing = app_state
    .products
    .find_by_id(product_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found or error fetching it.".to_string()))?;

  let validated = read_product_form(payload).await?.validate_update()?;
  let (mut draft, image) = validated.into_parts();

  let new_image = match image {
    Some(image) => {
      let name = app_state.images.upload(&image).await?;
      draft.image_url = Some(image_store::public_url(&app_state.config.app_base_url, &name));
      Some(name)
    }
    None => {
      draft.image_url = existing.image_url.clone();
      None
    }
  };

  let updated = match app_state.products.update(product_id, draft).await {
    Ok(Some(product)) => product,
    outcome => {
      if let Some(name) = &new_image {
        discard_image(&app_state, name).await;
      }
      return Err(match outcome {
        Err(e) => e,
        _ => AppError::NotFound("Product not found or error fetching it.".to_string()),
      });
    }
  };

  if new_image.is_some() {
    if let Some(old_name) = existing.image_url.as_deref().and_then(|url| owned_image_name(&app_state.config, url)) {
      discard_image(&app_state, old_name).await;
    }
  }

  info!(slug = %updated.slug, "Product updated.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated successfully!",
      "success": true,
      "product": updated
  })))
}

#[instrument(name = "handler::admin_delete_product", skip(app_state, path, _admin), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
  let deleted = app_state
    .products
    .delete(path.into_inner())
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found.".to_string()))?;

  if let Some(name) = deleted.image_url.as_deref().and_then(|url| owned_image_name(&app_state.config, url)) {
    discard_image(&app_state, name).await;
  }

  info!(slug = %deleted.slug, "Product deleted.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Product deleted successfully!",
      "success": true
  })))
}
