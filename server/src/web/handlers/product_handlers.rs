// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub q: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ProductDetailsQuery {
  pub slug: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state, query_params), fields(q = ?query_params.q))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let products = app_state.products.list_newest_first().await?;
  let products = nexmart::search(products, query_params.q.as_deref().unwrap_or_default());

  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

async fn product_by_slug(app_state: &AppState, slug: &str) -> Result<HttpResponse, AppError> {
  match app_state.products.find_by_slug(slug).await? {
    Some(product) => Ok(HttpResponse::Ok().json(json!({
        "message": "Product fetched successfully.",
        "product": product
    }))),
    None => {
      warn!("Product with slug '{}' not found.", slug);
      Err(AppError::NotFound("Product not found".to_string()))
    }
  }
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(slug = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  product_by_slug(&app_state, &path.into_inner()).await
}

/// Same lookup as `get_product_handler`, with the slug passed as `?slug=`.
#[instrument(name = "handler::product_details", skip(app_state, query_params))]
pub async fn product_details_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ProductDetailsQuery>,
) -> Result<HttpResponse, AppError> {
  let slug = query_params
    .slug
    .as_deref()
    .map(str::trim)
    .filter(|slug| !slug.is_empty())
    .ok_or_else(|| AppError::BadRequest("Product slug is required".to_string()))?;
  product_by_slug(&app_state, slug).await
}
