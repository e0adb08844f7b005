// server/src/db/memory.rs

use super::{AuthRepository, ProductRepository};
use crate::errors::{AppError, Result};
use crate::models::{Credential, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nexmart::{Product, ProductDraft};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Products kept in insertion order.
#[derive(Default)]
pub struct MemoryProductRepository {
  products: RwLock<Vec<Product>>,
}

impl MemoryProductRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

fn slug_taken(products: &[Product], slug: &str, except: Option<Uuid>) -> bool {
  products.iter().any(|p| p.slug == slug && Some(p.id) != except)
}

fn conflict(slug: &str) -> AppError {
  AppError::Conflict(format!("A product with slug '{}' already exists.", slug))
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
  async fn list_newest_first(&self) -> Result<Vec<Product>> {
    // Later inserts win ties on identical timestamps.
    let mut products: Vec<Product> = self.products.read().await.iter().rev().cloned().collect();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(products)
  }

  async fn list_by_name(&self) -> Result<Vec<Product>> {
    let mut products = self.products.read().await.clone();
    products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.name.cmp(&b.name)));
    Ok(products)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
    Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
  }

  async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
    Ok(self.products.read().await.iter().find(|p| p.slug == slug).cloned())
  }

  async fn insert(&self, draft: ProductDraft) -> Result<Product> {
    let mut products = self.products.write().await;
    if slug_taken(&products, &draft.slug, None) {
      return Err(conflict(&draft.slug));
    }
    let product = Product::from_draft(Uuid::new_v4(), draft, Utc::now());
    products.push(product.clone());
    Ok(product)
  }

  async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<Product>> {
    let mut products = self.products.write().await;
    if slug_taken(&products, &draft.slug, Some(id)) {
      return Err(conflict(&draft.slug));
    }
    Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
      product.apply(draft, Utc::now());
      product.clone()
    }))
  }

  async fn delete(&self, id: Uuid) -> Result<Option<Product>> {
    let mut products = self.products.write().await;
    Ok(products.iter().position(|p| p.id == id).map(|pos| products.remove(pos)))
  }

  async fn upsert_by_slug(&self, draft: ProductDraft) -> Result<Product> {
    let mut products = self.products.write().await;
    let now = Utc::now();
    match products.iter_mut().find(|p| p.slug == draft.slug) {
      Some(existing) => {
        existing.apply(draft, now);
        Ok(existing.clone())
      }
      None => {
        let product = Product::from_draft(Uuid::new_v4(), draft, now);
        products.push(product.clone());
        Ok(product)
      }
    }
  }
}

#[derive(Default)]
pub struct MemoryAuthRepository {
  users: RwLock<HashMap<Uuid, User>>,
  login_tokens: RwLock<HashMap<Uuid, Credential>>,
  sessions: RwLock<HashMap<Uuid, Credential>>,
}

impl MemoryAuthRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl AuthRepository for MemoryAuthRepository {
  async fn upsert_user(&self, email: &str) -> Result<User> {
    let mut users = self.users.write().await;
    if let Some(existing) = users.values().find(|u| u.email == email) {
      return Ok(existing.clone());
    }
    let user = User {
      id: Uuid::new_v4(),
      email: email.to_string(),
      created_at: Utc::now(),
    };
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
    Ok(self.users.read().await.get(&id).cloned())
  }

  async fn insert_login_token(&self, token: Credential) -> Result<()> {
    self.login_tokens.write().await.insert(token.id, token);
    Ok(())
  }

  async fn take_login_token(&self, id: Uuid) -> Result<Option<Credential>> {
    Ok(self.login_tokens.write().await.remove(&id))
  }

  async fn insert_session(&self, session: Credential) -> Result<()> {
    self.sessions.write().await.insert(session.id, session);
    Ok(())
  }

  async fn find_session(&self, id: Uuid) -> Result<Option<Credential>> {
    Ok(self.sessions.read().await.get(&id).cloned())
  }

  async fn delete_session(&self, id: Uuid) -> Result<bool> {
    Ok(self.sessions.write().await.remove(&id).is_some())
  }

  async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
    let mut removed = 0;
    for store in [&self.login_tokens, &self.sessions] {
      let mut credentials = store.write().await;
      let before = credentials.len();
      credentials.retain(|_, credential| !credential.is_expired_at(now));
      removed += (before - credentials.len()) as u64;
    }
    Ok(removed)
  }
}
