// server/src/db/postgres.rs

use super::{AuthRepository, ProductRepository};
use crate::errors::{AppError, Result};
use crate::models::product::PRODUCT_COLUMNS;
use crate::models::{Credential, ProductRow, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nexmart::{Product, ProductDraft};
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

fn slug_conflict_or(err: sqlx::Error, slug: &str) -> AppError {
  match &err {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
      AppError::Conflict(format!("A product with slug '{}' already exists.", slug))
    }
    _ => {
      error!("Database error while writing product '{}': {}", slug, err);
      AppError::Sqlx(err)
    }
  }
}

#[derive(Clone)]
pub struct PgProductRepository {
  pool: PgPool,
}

impl PgProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_ordered(&self, order_by: &str) -> Result<Vec<Product>> {
    let sql = format!("SELECT {} FROM products ORDER BY {}", PRODUCT_COLUMNS, order_by);
    let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
    Ok(rows.into_iter().map(Product::from).collect())
  }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
  #[instrument(name = "pg::list_products_newest_first", skip(self))]
  async fn list_newest_first(&self) -> Result<Vec<Product>> {
    self.fetch_ordered("created_at DESC").await
  }

  #[instrument(name = "pg::list_products_by_name", skip(self))]
  async fn list_by_name(&self) -> Result<Vec<Product>> {
    self.fetch_ordered("name ASC").await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
    let row: Option<ProductRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
    Ok(row.map(Product::from))
  }

  async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE slug = $1", PRODUCT_COLUMNS);
    let row: Option<ProductRow> = sqlx::query_as(&sql).bind(slug).fetch_optional(&self.pool).await?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "pg::insert_product", skip(self, draft), fields(slug = %draft.slug))]
  async fn insert(&self, draft: ProductDraft) -> Result<Product> {
    let sql = format!(
      "INSERT INTO products (id, name, slug, description, price_cents, category, inventory, image_url) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
      PRODUCT_COLUMNS
    );
    let row: ProductRow = sqlx::query_as(&sql)
      .bind(Uuid::new_v4())
      .bind(&draft.name)
      .bind(&draft.slug)
      .bind(&draft.description)
      .bind(draft.price.cents())
      .bind(&draft.category)
      .bind(draft.inventory)
      .bind(&draft.image_url)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| slug_conflict_or(e, &draft.slug))?;
    Ok(row.into())
  }

  #[instrument(name = "pg::update_product", skip(self, draft), fields(%id, slug = %draft.slug))]
  async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>> {
    let sql = format!(
      "UPDATE products SET name = $2, slug = $3, description = $4, price_cents = $5, category = $6, \
       inventory = $7, image_url = $8, updated_at = now() WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    );
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(id)
      .bind(&draft.name)
      .bind(&draft.slug)
      .bind(&draft.description)
      .bind(draft.price.cents())
      .bind(&draft.category)
      .bind(draft.inventory)
      .bind(&draft.image_url)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| slug_conflict_or(e, &draft.slug))?;
    Ok(row.map(Product::from))
  }

  async fn delete(&self, id: Uuid) -> Result<Option<Product>> {
    let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {}", PRODUCT_COLUMNS);
    let row: Option<ProductRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
    Ok(row.map(Product::from))
  }

  async fn upsert_by_slug(&self, draft: ProductDraft) -> Result<Product> {
    let sql = format!(
      "INSERT INTO products (id, name, slug, description, price_cents, category, inventory, image_url) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
       ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, description = EXCLUDED.description, \
       price_cents = EXCLUDED.price_cents, category = EXCLUDED.category, inventory = EXCLUDED.inventory, \
       image_url = EXCLUDED.image_url, updated_at = now() RETURNING {}",
      PRODUCT_COLUMNS
    );
    let row: ProductRow = sqlx::query_as(&sql)
      .bind(Uuid::new_v4())
      .bind(&draft.name)
      .bind(&draft.slug)
      .bind(&draft.description)
      .bind(draft.price.cents())
      .bind(&draft.category)
      .bind(draft.inventory)
      .bind(&draft.image_url)
      .fetch_one(&self.pool)
      .await?;
    Ok(row.into())
  }
}

#[derive(Clone)]
pub struct PgAuthRepository {
  pool: PgPool,
}

impl PgAuthRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
  async fn upsert_user(&self, email: &str) -> Result<User> {
    let user: User = sqlx::query_as(
      "INSERT INTO users (id, email) VALUES ($1, $2) \
       ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email RETURNING id, email, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .fetch_one(&self.pool)
    .await?;
    Ok(user)
  }

  async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
    let user: Option<User> = sqlx::query_as("SELECT id, email, created_at FROM users WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn insert_login_token(&self, token: Credential) -> Result<()> {
    sqlx::query("INSERT INTO login_tokens (id, user_id, secret_hash, expires_at) VALUES ($1, $2, $3, $4)")
      .bind(token.id)
      .bind(token.user_id)
      .bind(&token.secret_hash)
      .bind(token.expires_at)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn take_login_token(&self, id: Uuid) -> Result<Option<Credential>> {
    let token: Option<Credential> =
      sqlx::query_as("DELETE FROM login_tokens WHERE id = $1 RETURNING id, user_id, secret_hash, expires_at")
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
    Ok(token)
  }

  async fn insert_session(&self, session: Credential) -> Result<()> {
    sqlx::query("INSERT INTO auth_sessions (id, user_id, secret_hash, expires_at) VALUES ($1, $2, $3, $4)")
      .bind(session.id)
      .bind(session.user_id)
      .bind(&session.secret_hash)
      .bind(session.expires_at)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn find_session(&self, id: Uuid) -> Result<Option<Credential>> {
    let session: Option<Credential> =
      sqlx::query_as("SELECT id, user_id, secret_hash, expires_at FROM auth_sessions WHERE id = $1")
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
    Ok(session)
  }

  async fn delete_session(&self, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
    let mut tx = self.pool.begin().await?;
    let tokens = sqlx::query("DELETE FROM login_tokens WHERE expires_at <= $1")
      .bind(now)
      .execute(&mut *tx)
      .await?;
    let sessions = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1")
      .bind(now)
      .execute(&mut *tx)
      .await?;
    tx.commit().await?;
    Ok(tokens.rows_affected() + sessions.rows_affected())
  }
}
