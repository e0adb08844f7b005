// src/lib.rs

//! NexMart: the domain core of a small storefront.
//!
//! This crate holds everything the storefront knows without touching I/O:
//!  - `Product` records and `Money` amounts kept as integer cents.
//!  - The shopping cart: a plain `Cart` value, a shared `CartStore` handle
//!    and a `CartSessions` registry that owns one store per visitor.
//!  - Catalog queries (name search, inventory report).
//!  - Validation of admin product forms, including the uploaded image.
//!
//! Persistence, authentication and file storage live in `nexmart_server`.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod product;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::cart::line_item::LineItem;
pub use crate::cart::sessions::CartSessions;
pub use crate::cart::store::{Cart, CartStore};

pub use crate::catalog::{inventory_report, search, InventoryReport, DEFAULT_LOW_STOCK_THRESHOLD};

pub use crate::money::Money;
pub use crate::product::{Product, ProductDraft};

pub use crate::validation::{FieldErrors, ImageUpload, ProductForm, ValidatedProduct};

pub use crate::error::{ShopError, ShopResult};
