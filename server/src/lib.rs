// server/src/lib.rs

//! HTTP storefront around the `nexmart` core: catalog, per-visitor carts,
//! magic-link sign-in and an admin area for products and inventory.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod web;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::state::AppState;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

/// Builds the application state for `config`: PostgreSQL (with migrations
/// applied) when a database URL is set, in-memory repositories otherwise.
/// Seeds the demo catalog when enabled.
pub async fn build_state(config: Arc<AppConfig>) -> AppResult<AppState> {
  let state = match config.database_url.as_deref() {
    Some(url) => {
      let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(url)
        .await
        .context("connecting to the database")?;
      info!("Successfully connected to the database.");
      sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("applying database migrations")?;
      info!("Database migrations applied.");
      AppState::postgres(pool, config.clone())
    }
    None => {
      info!("DATABASE_URL not set; using the in-memory backend.");
      AppState::in_memory(config.clone())
    }
  };

  if config.seed_db {
    seed::seed_products(state.products.as_ref()).await?;
  }
  Ok(state)
}
