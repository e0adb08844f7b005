// core/src/catalog.rs

//! Read-only queries over a list of products: name search for the public
//! catalog and the stock report behind the inventory dashboard.

use crate::money::Money;
use crate::product::Product;
use serde::Serialize;

/// Products with fewer units than this are reported as running low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 20;

/// Case-insensitive substring match on the product name.
///
/// A blank term matches everything. Input order is preserved.
pub fn search(products: Vec<Product>, term: &str) -> Vec<Product> {
  let needle = term.trim().to_lowercase();
  if needle.is_empty() {
    return products;
  }
  products
    .into_iter()
    .filter(|product| product.name.to_lowercase().contains(&needle))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
  pub total_products: usize,
  pub low_stock_threshold: i32,
  pub low_stock_items: Vec<Product>,
  pub total_inventory_value: Money,
}

impl InventoryReport {
  pub fn low_stock_count(&self) -> usize {
    self.low_stock_items.len()
  }
}

pub fn inventory_report(products: &[Product], low_stock_threshold: i32) -> InventoryReport {
  InventoryReport {
    total_products: products.len(),
    low_stock_threshold,
    low_stock_items: products
      .iter()
      .filter(|product| product.inventory < low_stock_threshold)
      .cloned()
      .collect(),
    total_inventory_value: products.iter().map(Product::inventory_value).sum(),
  }
}
