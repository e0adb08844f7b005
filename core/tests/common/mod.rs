// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{TimeZone, Utc};
use nexmart::Product;
use once_cell::sync::Lazy;
use tracing::Level;
use uuid::Uuid;

// --- Product fixtures ---
pub fn product(key: &str, price_cents: i64) -> Product {
  product_named(key, key, price_cents, 10)
}

pub fn product_named(key: &str, name: &str, price_cents: i64, inventory: i32) -> Product {
  let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
  Product {
    id: id_for(key),
    name: name.to_string(),
    slug: key.to_lowercase().replace(' ', "-"),
    description: None,
    price_cents,
    category: None,
    inventory,
    image_url: None,
    created_at: created,
    updated_at: created,
  }
}

/// Stable id per key, so the same key always means the same product.
pub fn id_for(key: &str) -> Uuid {
  let seed = key
    .bytes()
    .fold(0xcbf2_9ce4_8422_2325_u128, |acc, b| (acc ^ u128::from(b)).wrapping_mul(0x0100_0000_01b3));
  Uuid::from_u128(seed)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
