// server/src/state.rs
use crate::config::AppConfig;
use crate::db::{
  AuthRepository, MemoryAuthRepository, MemoryProductRepository, PgAuthRepository, PgProductRepository,
  ProductRepository,
};
use crate::services::{ImageStore, LocalImageStore, MemoryImageStore, MockMailer};
use nexmart::CartSessions;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub products: Arc<dyn ProductRepository>,
  pub auth: Arc<dyn AuthRepository>,
  pub images: Arc<dyn ImageStore>,
  pub carts: CartSessions,
  pub mailer: MockMailer,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// PostgreSQL-backed repositories with images on the local filesystem.
  pub fn postgres(pool: PgPool, config: Arc<AppConfig>) -> Self {
    Self {
      products: Arc::new(PgProductRepository::new(pool.clone())),
      auth: Arc::new(PgAuthRepository::new(pool)),
      images: Arc::new(LocalImageStore::new(config.image_dir.clone())),
      carts: CartSessions::new(),
      mailer: MockMailer::new(config.mock_email_sender.clone()),
      config,
    }
  }

  /// In-memory repositories with images on the local filesystem.
  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    let images = Arc::new(LocalImageStore::new(config.image_dir.clone()));
    Self::with_images(config, images)
  }

  /// Fully in-memory state, images included.
  pub fn ephemeral(config: Arc<AppConfig>) -> Self {
    Self::with_images(config, Arc::new(MemoryImageStore::new()))
  }

  pub fn with_images(config: Arc<AppConfig>, images: Arc<dyn ImageStore>) -> Self {
    Self {
      products: Arc::new(MemoryProductRepository::new()),
      auth: Arc::new(MemoryAuthRepository::new()),
      images,
      carts: CartSessions::new(),
      mailer: MockMailer::new(config.mock_email_sender.clone()),
      config,
    }
  }
}
