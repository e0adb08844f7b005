// tests/cart_api_tests.rs
#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use nexmart_server::web::extractors::CART_COOKIE;
use serde_json::{json, Value};
use uuid::Uuid;

async fn product_id(state: &nexmart_server::state::AppState, slug: &str) -> Uuid {
  state.products.find_by_slug(slug).await.unwrap().unwrap().id
}

#[actix_rt::test]
async fn test_reading_without_a_cookie_starts_no_session() {
  setup_tracing();
  let state = seeded_state().await;
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cart").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(response_cookie(&resp, CART_COOKIE).is_none());
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["items"], json!([]));
  assert_eq!(body["is_open"], false);
  assert_eq!(body["total_items"], 0);
  assert_eq!(body["total"], "0.00");

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cart/count").to_request()).await;
  assert!(response_cookie(&resp, CART_COOKIE).is_none());
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["total_items"], 0);

  // An unknown cookie is not registered by a read either.
  let stranger = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cart").cookie(stranger).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(state.carts.is_empty());
}

#[actix_rt::test]
async fn test_first_change_starts_a_cart_session() {
  let state = seeded_state().await;
  let app = test_app!(state);
  let visor = product_id(&state, "cyber-visor-x1").await;

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .set_json(json!({ "product_id": visor }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let cookie = response_cookie(&resp, CART_COOKIE).expect("cart cookie set");
  assert!(Uuid::parse_str(cookie.value()).is_ok());
  assert_eq!(state.carts.len(), 1);

  // A known cookie does not start another session.
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cart").cookie(cookie).to_request()).await;
  assert!(response_cookie(&resp, CART_COOKIE).is_none());
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["total_items"], 1);
  assert_eq!(state.carts.len(), 1);
}

#[actix_rt::test]
async fn test_adding_same_product_twice() {
  setup_tracing();
  let state = seeded_state().await;
  let app = test_app!(state);
  let visor = product_id(&state, "cyber-visor-x1").await;
  let cookie = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());

  for _ in 0..2 {
    let req = test::TestRequest::post()
      .uri("/api/v1/cart/items")
      .cookie(cookie.clone())
      .set_json(json!({ "product_id": visor }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/cart").cookie(cookie).to_request()).await;
  let items = body["items"].as_array().unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0]["id"], json!(visor));
  assert_eq!(items[0]["name"], "Cyber-Visor X1");
  assert_eq!(items[0]["quantity"], 2);
  assert_eq!(items[0]["line_total"], "1599.98");
  assert_eq!(body["total_items"], 2);
  assert_eq!(body["total_cents"], 159_998);
  assert_eq!(body["total"], "1599.98");
}

#[actix_rt::test]
async fn test_adding_unknown_product_is_not_found() {
  let state = seeded_state().await;
  let app = test_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .set_json(json!({ "product_id": Uuid::new_v4() }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_quantity_controls() {
  let state = seeded_state().await;
  let app = test_app!(state);
  let ssd = product_id(&state, "quantum-drive-ssd-2tb").await;
  let brewer = product_id(&state, "auto-brewer-9000").await;
  let cookie = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());

  for id in [ssd, brewer] {
    let req = test::TestRequest::post()
      .uri("/api/v1/cart/items")
      .cookie(cookie.clone())
      .set_json(json!({ "product_id": id }))
      .to_request();
    test::call_service(&app, req).await;
  }

  let increase = format!("/api/v1/cart/items/{}/increase", ssd);
  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::post().uri(&increase).cookie(cookie.clone()).to_request()).await;
  assert_eq!(body["items"][0]["quantity"], 2);
  assert_eq!(body["total_items"], 3);

  // Decreasing a single unit removes the line.
  let decrease = format!("/api/v1/cart/items/{}/decrease", brewer);
  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::post().uri(&decrease).cookie(cookie.clone()).to_request()).await;
  assert_eq!(body["items"].as_array().unwrap().len(), 1);
  assert_eq!(body["total"], "499.98");

  // Unknown ids are ignored.
  let unknown = format!("/api/v1/cart/items/{}/increase", Uuid::new_v4());
  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::post().uri(&unknown).cookie(cookie.clone()).to_request()).await;
  assert_eq!(body["total_items"], 2);

  let remove = format!("/api/v1/cart/items/{}", ssd);
  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::delete().uri(&remove).cookie(cookie.clone()).to_request()).await;
  assert_eq!(body["items"], json!([]));
  assert_eq!(body["total_cents"], 0);
}

#[actix_rt::test]
async fn test_clear_toggle_and_count() {
  let state = seeded_state().await;
  let app = test_app!(state);
  let monitor = product_id(&state, "aether-frame-32-4k").await;
  let cookie = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .cookie(cookie.clone())
    .set_json(json!({ "product_id": monitor }))
    .to_request();
  test::call_service(&app, req).await;

  let body: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/api/v1/cart/count").cookie(cookie.clone()).to_request(),
  )
  .await;
  assert_eq!(body["total_items"], 1);

  let body: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::post().uri("/api/v1/cart/toggle").cookie(cookie.clone()).to_request(),
  )
  .await;
  assert_eq!(body["is_open"], true);

  let body: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::delete().uri("/api/v1/cart").cookie(cookie.clone()).to_request(),
  )
  .await;
  assert_eq!(body["items"], json!([]));
  assert_eq!(body["total_items"], 0);
  // Clearing leaves visibility alone.
  assert_eq!(body["is_open"], true);
}

#[actix_rt::test]
async fn test_carts_are_independent_per_cookie() {
  let state = seeded_state().await;
  let app = test_app!(state);
  let keyboard = product_id(&state, "ergo-flow-keyboard").await;
  let alice = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());
  let bob = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .cookie(alice.clone())
    .set_json(json!({ "product_id": keyboard }))
    .to_request();
  test::call_service(&app, req).await;

  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/cart").cookie(bob).to_request()).await;
  assert_eq!(body["total_items"], 0);
  assert_eq!(state.carts.len(), 1);

  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/cart").cookie(alice).to_request()).await;
  assert_eq!(body["total_items"], 1);
}

#[actix_rt::test]
async fn test_ending_the_session_discards_the_cart() {
  let state = seeded_state().await;
  let app = test_app!(state);
  let keyboard = product_id(&state, "ergo-flow-keyboard").await;
  let cookie = Cookie::new(CART_COOKIE, Uuid::new_v4().to_string());

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .cookie(cookie.clone())
    .set_json(json!({ "product_id": keyboard }))
    .to_request();
  test::call_service(&app, req).await;
  assert_eq!(state.carts.len(), 1);

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/api/v1/cart/session/end").cookie(cookie.clone()).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let removal = response_cookie(&resp, CART_COOKIE).expect("cart cookie cleared");
  assert_eq!(removal.value(), "");
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["ended"], true);
  assert!(state.carts.is_empty());

  // The ended id now reads as an empty cart without being reopened.
  let body: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/cart").cookie(cookie).to_request()).await;
  assert_eq!(body["total_items"], 0);
  assert!(state.carts.is_empty());
}
