// server/src/models/mod.rs

//! Database row types. Domain records live in the `nexmart` core crate;
//! these structs map table rows onto them.

pub mod credential;
pub mod product;
pub mod user;

pub use credential::Credential;
pub use product::ProductRow;
pub use user::User;
