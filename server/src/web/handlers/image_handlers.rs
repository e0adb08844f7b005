// server/src/web/handlers/image_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::get_image", skip(app_state, path), fields(name = %path.as_str()))]
pub async fn get_image_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let name = path.into_inner();
  let image = app_state
    .images
    .fetch(&name)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Image {} not found.", name)))?;

  Ok(
    HttpResponse::Ok()
      .content_type(image.content_type)
      .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
      .body(image.bytes),
  )
}
