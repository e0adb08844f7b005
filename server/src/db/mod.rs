// server/src/db/mod.rs

//! Storage ports for products and authentication, with a PostgreSQL
//! implementation and an in-memory one (used when no `DATABASE_URL` is
//! configured, and by the integration tests).

pub mod memory;
pub mod postgres;

use crate::errors::Result;
use crate::models::{Credential, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nexmart::{Product, ProductDraft};
use uuid::Uuid;

pub use memory::{MemoryAuthRepository, MemoryProductRepository};
pub use postgres::{PgAuthRepository, PgProductRepository};

#[async_trait]
pub trait ProductRepository: Send + Sync {
  /// Public catalog order.
  async fn list_newest_first(&self) -> Result<Vec<Product>>;

  /// Admin panel order.
  async fn list_by_name(&self) -> Result<Vec<Product>>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;

  async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>>;

  /// Fails with `AppError::Conflict` when the slug is taken.
  async fn insert(&self, draft: ProductDraft) -> Result<Product>;

  /// Returns `None` when no product has this id.
  async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>>;

  /// Returns the deleted product.
  async fn delete(&self, id: Uuid) -> Result<Option<Product>>;

  /// Inserts or overwrites the product with the draft's slug.
  async fn upsert_by_slug(&self, draft: ProductDraft) -> Result<Product>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
  /// Returns the user with this (already normalized) email, creating it on first use.
  async fn upsert_user(&self, email: &str) -> Result<User>;

  async fn find_user(&self, id: Uuid) -> Result<Option<User>>;

  async fn insert_login_token(&self, token: Credential) -> Result<()>;

  /// Removes and returns the login token, so it can be exchanged only once.
  async fn take_login_token(&self, id: Uuid) -> Result<Option<Credential>>;

  async fn insert_session(&self, session: Credential) -> Result<()>;

  async fn find_session(&self, id: Uuid) -> Result<Option<Credential>>;

  async fn delete_session(&self, id: Uuid) -> Result<bool>;

  /// Deletes login tokens and sessions that expired at or before `now`.
  /// Returns how many credentials were removed.
  async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
