// server/src/models/product.rs

use chrono::{DateTime, Utc};
use nexmart::Product;
use sqlx::FromRow;
use uuid::Uuid;

/// Column list shared by every product query.
pub const PRODUCT_COLUMNS: &str =
  "id, name, slug, description, price_cents, category, inventory, image_url, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub description: Option<String>, // Description can be optional
  pub price_cents: i64,
  pub category: Option<String>,
  pub inventory: i32,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      slug: row.slug,
      description: row.description,
      price_cents: row.price_cents,
      category: row.category,
      inventory: row.inventory,
      image_url: row.image_url,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}
