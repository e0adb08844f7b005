// server/src/services/image_store.rs

//! Storage for product images.
//!
//! Images are stored under a generated flat name (`<unix-millis>-<random>.<ext>`)
//! and served back through `/images/{name}`. The public URL is what the
//! product row keeps; the stored name is its last path segment.

use crate::errors::{AppError, Result};
use anyhow::Context;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use async_trait::async_trait;
use chrono::Utc;
use nexmart::ImageUpload;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const RANDOM_SUFFIX_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
  pub content_type: String,
  pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
  /// Stores the upload and returns its generated name.
  async fn upload(&self, image: &ImageUpload) -> Result<String>;

  async fn remove(&self, name: &str) -> Result<()>;

  async fn fetch(&self, name: &str) -> Result<Option<StoredImage>>;
}

/// `<unix-millis>-<6 random chars>.<ext>`; the extension falls back to `bin`.
pub fn unique_file_name(image: &ImageUpload) -> String {
  let mut random = [0u8; RANDOM_SUFFIX_LEN];
  OsRng.fill_bytes(&mut random);
  let suffix: String = random
    .iter()
    .map(|b| NAME_ALPHABET[usize::from(*b) % NAME_ALPHABET.len()] as char)
    .collect();
  let ext = image
    .extension()
    .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
    .map(str::to_ascii_lowercase)
    .unwrap_or_else(|| "bin".to_string());
  format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, ext)
}

pub fn public_url(base_url: &str, name: &str) -> String {
  format!("{}/images/{}", base_url.trim_end_matches('/'), name)
}

/// Last path segment of a stored image URL.
pub fn name_from_url(url: &str) -> Option<&str> {
  url
    .rsplit('/')
    .next()
    .map(|segment| segment.split(['?', '#']).next().unwrap_or(segment))
    .filter(|name| is_valid_name(name))
}

/// Flat names only: no separators, no leading dot.
pub fn is_valid_name(name: &str) -> bool {
  !name.is_empty()
    && !name.starts_with('.')
    && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

pub fn content_type_for(name: &str) -> &'static str {
  match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).as_deref() {
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("png") => "image/png",
    Some("webp") => "image/webp",
    _ => "application/octet-stream",
  }
}

fn checked(name: &str) -> Result<&str> {
  if is_valid_name(name) {
    Ok(name)
  } else {
    Err(AppError::BadRequest(format!("Invalid image name '{}'.", name)))
  }
}

fn storage_error(err: anyhow::Error) -> AppError {
  AppError::Storage(format!("{:#}", err))
}

/// Writes images into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
  dir: PathBuf,
}

impl LocalImageStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }
}

#[async_trait]
impl ImageStore for LocalImageStore {
  #[instrument(name = "image_store::upload", skip(self, image), fields(bytes = image.len()))]
  async fn upload(&self, image: &ImageUpload) -> Result<String> {
    let name = unique_file_name(image);
    tokio::fs::create_dir_all(&self.dir)
      .await
      .with_context(|| format!("creating image directory {}", self.dir.display()))
      .map_err(storage_error)?;
    tokio::fs::write(self.dir.join(&name), &image.bytes)
      .await
      .with_context(|| format!("writing image {}", name))
      .map_err(storage_error)?;
    debug!(%name, "Image stored.");
    Ok(name)
  }

  async fn remove(&self, name: &str) -> Result<()> {
    let name = checked(name)?;
    tokio::fs::remove_file(self.dir.join(name))
      .await
      .with_context(|| format!("removing image {}", name))
      .map_err(storage_error)
  }

  async fn fetch(&self, name: &str) -> Result<Option<StoredImage>> {
    let name = checked(name)?;
    match tokio::fs::read(self.dir.join(name)).await {
      Ok(bytes) => Ok(Some(StoredImage {
        content_type: content_type_for(name).to_string(),
        bytes,
      })),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(storage_error(anyhow::Error::new(e).context(format!("reading image {}", name)))),
    }
  }
}

/// Keeps images in memory. Used by tests and by the database-less backend.
#[derive(Default)]
pub struct MemoryImageStore {
  images: RwLock<HashMap<String, StoredImage>>,
}

impl MemoryImageStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn contains(&self, name: &str) -> bool {
    self.images.read().await.contains_key(name)
  }

  pub async fn len(&self) -> usize {
    self.images.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.images.read().await.is_empty()
  }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
  async fn upload(&self, image: &ImageUpload) -> Result<String> {
    let name = unique_file_name(image);
    let stored = StoredImage {
      content_type: image.content_type.clone(),
      bytes: image.bytes.clone(),
    };
    self.images.write().await.insert(name.clone(), stored);
    Ok(name)
  }

  async fn remove(&self, name: &str) -> Result<()> {
    match self.images.write().await.remove(checked(name)?) {
      Some(_) => Ok(()),
      None => Err(AppError::Storage(format!("image {} not found", name))),
    }
  }

  async fn fetch(&self, name: &str) -> Result<Option<StoredImage>> {
    Ok(self.images.read().await.get(checked(name)?).cloned())
  }
}
