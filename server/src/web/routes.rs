// server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  admin_handlers, auth_handlers, cart_handlers, dashboard_handlers, image_handlers, product_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            // Registered before `/{slug}` so "details" is not taken for a slug.
            .route("/details", web::get().to(product_handlers::product_details_handler))
            .route("/{slug}", web::get().to(product_handlers::get_product_handler)),
        )
        .service(
          web::scope("/cart")
            .service(
              web::resource("")
                .route(web::get().to(cart_handlers::get_cart_handler))
                .route(web::delete().to(cart_handlers::clear_cart_handler)),
            )
            .route("/items", web::post().to(cart_handlers::add_to_cart_handler))
            .route("/items/{product_id}", web::delete().to(cart_handlers::remove_from_cart_handler))
            .route(
              "/items/{product_id}/increase",
              web::post().to(cart_handlers::increase_quantity_handler),
            )
            .route(
              "/items/{product_id}/decrease",
              web::post().to(cart_handlers::decrease_quantity_handler),
            )
            .route("/toggle", web::post().to(cart_handlers::toggle_cart_handler))
            .route("/count", web::get().to(cart_handlers::cart_count_handler))
            .route("/session/end", web::post().to(cart_handlers::end_cart_session_handler)),
        ),
    )
    .service(
      web::scope("/auth")
        .route("/magic-link", web::post().to(auth_handlers::request_magic_link_handler))
        .route("/callback", web::get().to(auth_handlers::auth_callback_handler))
        .route("/logout", web::post().to(auth_handlers::logout_handler))
        .route("/me", web::get().to(auth_handlers::me_handler)),
    )
    .service(
      web::scope("/admin/products")
        .service(
          web::resource("")
            .route(web::get().to(admin_handlers::list_products_handler))
            .route(web::post().to(admin_handlers::create_product_handler)),
        )
        .service(
          web::resource("/{product_id}")
            .route(web::get().to(admin_handlers::get_product_handler))
            .route(web::put().to(admin_handlers::update_product_handler))
            .route(web::delete().to(admin_handlers::delete_product_handler)),
        ),
    )
    .route("/dashboard", web::get().to(dashboard_handlers::dashboard_handler))
    .route("/images/{name}", web::get().to(image_handlers::get_image_handler));
}
