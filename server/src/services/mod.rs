// server/src/services/mod.rs

pub mod auth_service;
pub mod cart_sweeper;
pub mod credential_sweeper;
pub mod email_mock;
pub mod image_store;

pub use email_mock::MockMailer;
pub use image_store::{ImageStore, LocalImageStore, MemoryImageStore};
