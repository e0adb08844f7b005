// core/src/cart/mod.rs

//! The shopping cart.
//!
//! `Cart` is a plain value with total operations; `CartStore` wraps one in a
//! shared, lockable handle so several presentation surfaces (add-to-cart
//! control, cart panel, header badge) can read and mutate the same cart.
//! `CartSessions` owns one store per visitor session.

pub mod line_item;
pub mod sessions;
pub mod store;
