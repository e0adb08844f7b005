// core/src/cart/store.rs
use crate::cart::line_item::LineItem;
use crate::money::Money;
use crate::product::Product;
use parking_lot::{RwLock, RwLockReadGuard};
use serde::Serialize;
use std::sync::Arc;
use tracing::{event, Level};
use uuid::Uuid;

/// Line items in insertion order plus the panel visibility flag.
///
/// Every operation is total: unknown product ids are no-ops. Aggregates are
/// computed on each call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
  items: Vec<LineItem>,
  is_open: bool,
}

impl Cart {
  /// An empty, closed cart.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn items(&self) -> &[LineItem] {
    &self.items
  }

  pub fn is_open(&self) -> bool {
    self.is_open
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn line(&self, product_id: Uuid) -> Option<&LineItem> {
    self.items.iter().find(|item| item.id() == product_id)
  }

  /// Adds one unit of `product`: bumps an existing line or appends a new one.
  pub fn add_item(&mut self, product: Product) {
    match self.items.iter_mut().find(|item| item.id() == product.id) {
      Some(existing) => existing.increment(),
      None => self.items.push(LineItem::new(product)),
    }
  }

  pub fn remove_item(&mut self, product_id: Uuid) {
    self.items.retain(|item| item.id() != product_id);
  }

  pub fn increase_quantity(&mut self, product_id: Uuid) {
    if let Some(item) = self.items.iter_mut().find(|item| item.id() == product_id) {
      item.increment();
    }
  }

  /// Removes the line instead of leaving it at zero.
  pub fn decrease_quantity(&mut self, product_id: Uuid) {
    if let Some(pos) = self.items.iter().position(|item| item.id() == product_id) {
      if self.items[pos].decrement() {
        self.items.remove(pos);
      }
    }
  }

  pub fn clear(&mut self) {
    self.items.clear();
  }

  pub fn toggle(&mut self) {
    self.is_open = !self.is_open;
  }

  /// Sum of price times quantity over all lines.
  pub fn total(&self) -> Money {
    self.items.iter().map(LineItem::line_total).sum()
  }

  /// Sum of quantities over all lines.
  pub fn total_items(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.quantity())).sum()
  }
}

/// A shared handle to one cart.
///
/// Clones point at the same cart. Each method holds the lock for the duration
/// of a single operation; guards from `read()` MUST NOT be held across
/// `.await` points.
#[derive(Debug, Clone, Default)]
pub struct CartStore(Arc<RwLock<Cart>>);

impl CartStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Read access for projections that need several fields at once.
  pub fn read(&self) -> RwLockReadGuard<'_, Cart> {
    self.0.read()
  }

  /// A point-in-time copy of the cart.
  pub fn snapshot(&self) -> Cart {
    self.0.read().clone()
  }

  pub fn add_item(&self, product: Product) {
    event!(Level::DEBUG, product_id = %product.id, "Adding item to cart.");
    self.0.write().add_item(product);
  }

  pub fn remove_item(&self, product_id: Uuid) {
    event!(Level::DEBUG, %product_id, "Removing item from cart.");
    self.0.write().remove_item(product_id);
  }

  pub fn increase_quantity(&self, product_id: Uuid) {
    self.0.write().increase_quantity(product_id);
  }

  pub fn decrease_quantity(&self, product_id: Uuid) {
    self.0.write().decrease_quantity(product_id);
  }

  pub fn clear(&self) {
    event!(Level::DEBUG, "Clearing cart.");
    self.0.write().clear();
  }

  /// Flips the panel visibility and returns the new value.
  pub fn toggle(&self) -> bool {
    let mut cart = self.0.write();
    cart.toggle();
    cart.is_open()
  }

  pub fn is_open(&self) -> bool {
    self.0.read().is_open()
  }

  pub fn total(&self) -> Money {
    self.0.read().total()
  }

  pub fn total_items(&self) -> u64 {
    self.0.read().total_items()
  }
}
