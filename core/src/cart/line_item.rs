// core/src/cart/line_item.rs

use crate::money::Money;
use crate::product::Product;
use serde::Serialize;
use uuid::Uuid;

/// A product snapshot plus a quantity. The quantity is never zero: only `Cart`
/// mutates it, and it removes the line instead of storing 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
  #[serde(flatten)]
  product: Product,
  quantity: u32,
}

impl LineItem {
  pub(crate) fn new(product: Product) -> Self {
    LineItem { product, quantity: 1 }
  }

  /// Identity of a line is the identity of its product.
  pub fn id(&self) -> Uuid {
    self.product.id
  }

  pub fn product(&self) -> &Product {
    &self.product
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  pub fn line_total(&self) -> Money {
    self.product.price().times(i64::from(self.quantity))
  }

  pub(crate) fn increment(&mut self) {
    self.quantity = self.quantity.saturating_add(1);
  }

  /// Decrements and reports whether the line is now empty.
  pub(crate) fn decrement(&mut self) -> bool {
    self.quantity = self.quantity.saturating_sub(1);
    self.quantity == 0
  }
}
