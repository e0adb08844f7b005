// server/src/web/handlers/dashboard_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminUser;

#[instrument(name = "handler::dashboard", skip(app_state, admin), fields(admin = %admin.0.email))]
pub async fn dashboard_handler(app_state: web::Data<AppState>, admin: AdminUser) -> Result<HttpResponse, AppError> {
  let products = app_state.products.list_by_name().await?;
  let report = nexmart::inventory_report(&products, app_state.config.low_stock_threshold);

  info!(
    total_products = report.total_products,
    low_stock = report.low_stock_count(),
    "Inventory report built."
  );

  Ok(HttpResponse::Ok().json(json!({
      "total_products": report.total_products,
      "low_stock_threshold": report.low_stock_threshold,
      "low_stock_count": report.low_stock_count(),
      "total_inventory_value": report.total_inventory_value.to_string(),
      "total_inventory_value_cents": report.total_inventory_value.cents(),
      "low_stock_items": report.low_stock_items,
  })))
}
