// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use nexmart::{Cart, LineItem};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{CartSession, CartSnapshot, CART_COOKIE};

// --- Response DTOs ---

#[derive(Serialize)]
struct CartLineView<'a> {
  #[serde(flatten)]
  item: &'a LineItem,
  line_total_cents: i64,
  line_total: String,
}

#[derive(Serialize)]
pub struct CartView<'a> {
  items: Vec<CartLineView<'a>>,
  is_open: bool,
  total_items: u64,
  total_cents: i64,
  total: String,
}

impl<'a> CartView<'a> {
  pub fn of(cart: &'a Cart) -> Self {
    let total = cart.total();
    CartView {
      items: cart
        .items()
        .iter()
        .map(|item| CartLineView {
          item,
          line_total_cents: item.line_total().cents(),
          line_total: item.line_total().to_string(),
        })
        .collect(),
      is_open: cart.is_open(),
      total_items: cart.total_items(),
      total_cents: total.cents(),
      total: total.to_string(),
    }
  }
}

/// Renders the cart as it is after the request's mutation.
fn cart_response(session: &CartSession) -> HttpResponse {
  let cart = session.store.snapshot();
  let mut response = HttpResponse::Ok();
  session.attach_cookie(&mut response);
  response.json(CartView::of(&cart))
}

// --- Request DTO ---
#[derive(Deserialize, Debug)]
pub struct AddToCartRequestPayload {
  pub product_id: Uuid,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(snapshot), fields(cart_session = ?snapshot.id))]
pub async fn get_cart_handler(snapshot: CartSnapshot) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(CartView::of(&snapshot.cart)))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, session),
    fields(cart_session = %session.id, product_id = %req_payload.product_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .products
    .find_by_id(req_payload.product_id)
    .await?
    .ok_or_else(|| {
      warn!("Add to cart for unknown product {}.", req_payload.product_id);
      AppError::NotFound("Product not found".to_string())
    })?;

  session.store.add_item(product);
  info!(total_items = session.store.total_items(), "Item added to cart.");
  Ok(cart_response(&session))
}

#[instrument(name = "handler::remove_from_cart", skip(path, session), fields(cart_session = %session.id))]
pub async fn remove_from_cart_handler(path: web::Path<Uuid>, session: CartSession) -> Result<HttpResponse, AppError> {
  session.store.remove_item(path.into_inner());
  Ok(cart_response(&session))
}

#[instrument(name = "handler::increase_quantity", skip(path, session), fields(cart_session = %session.id))]
pub async fn increase_quantity_handler(path: web::Path<Uuid>, session: CartSession) -> Result<HttpResponse, AppError> {
  session.store.increase_quantity(path.into_inner());
  Ok(cart_response(&session))
}

#[instrument(name = "handler::decrease_quantity", skip(path, session), fields(cart_session = %session.id))]
pub async fn decrease_quantity_handler(path: web::Path<Uuid>, session: CartSession) -> Result<HttpResponse, AppError> {
  session.store.decrease_quantity(path.into_inner());
  Ok(cart_response(&session))
}

#[instrument(name = "handler::clear_cart", skip(session), fields(cart_session = %session.id))]
pub async fn clear_cart_handler(session: CartSession) -> Result<HttpResponse, AppError> {
  session.store.clear();
  Ok(cart_response(&session))
}

#[instrument(name = "handler::toggle_cart", skip(session), fields(cart_session = %session.id))]
pub async fn toggle_cart_handler(session: CartSession) -> Result<HttpResponse, AppError> {
  session.store.toggle();
  Ok(cart_response(&session))
}

#[instrument(name = "handler::cart_count", skip(snapshot), fields(cart_session = ?snapshot.id))]
pub async fn cart_count_handler(snapshot: CartSnapshot) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(json!({ "total_items": snapshot.cart.total_items() })))
}

#[instrument(name = "handler::end_cart_session", skip(app_state, req))]
pub async fn end_cart_session_handler(
  app_state: web::Data<AppState>,
  req: actix_web::HttpRequest,
) -> Result<HttpResponse, AppError> {
  let ended = req
    .cookie(CART_COOKIE)
    .and_then(|c| Uuid::parse_str(c.value()).ok())
    .map(|id| app_state.carts.end(id))
    .unwrap_or(false);
  info!(ended, "Cart session end requested.");

  let mut response = HttpResponse::Ok();
  let mut removal = actix_web::cookie::Cookie::build(CART_COOKIE, "").path("/").finish();
  removal.make_removal();
  response.cookie(removal);
  Ok(response.json(json!({ "ended": ended })))
}
