// core/src/product.rs

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry. The cart only ever copies fields out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub price_cents: i64,
  pub category: Option<String>,
  pub inventory: i32,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  /// Materializes a stored product from a draft. Used by backends that assign ids themselves.
  pub fn from_draft(id: Uuid, draft: ProductDraft, now: DateTime<Utc>) -> Self {
    Product {
      id,
      name: draft.name,
      slug: draft.slug,
      description: draft.description,
      price_cents: draft.price.cents(),
      category: draft.category,
      inventory: draft.inventory,
      image_url: draft.image_url,
      created_at: now,
      updated_at: now,
    }
  }

  /// Overwrites every editable field with the draft's values.
  pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
    self.name = draft.name;
    self.slug = draft.slug;
    self.description = draft.description;
    self.price_cents = draft.price.cents();
    self.category = draft.category;
    self.inventory = draft.inventory;
    self.image_url = draft.image_url;
    self.updated_at = now;
  }

  pub fn price(&self) -> Money {
    Money::from_cents(self.price_cents)
  }

  pub fn in_stock(&self) -> bool {
    self.inventory > 0
  }

  /// Price times units on hand.
  pub fn inventory_value(&self) -> Money {
    self.price().times(i64::from(self.inventory.max(0)))
  }
}

/// The editable fields of a product, ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub price: Money,
  pub category: Option<String>,
  pub inventory: i32,
  pub image_url: Option<String>,
}
