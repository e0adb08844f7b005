// server/src/seed.rs

//! Demo catalog loaded at startup when `SEED_DB=true`.

use crate::db::ProductRepository;
use crate::errors::Result;
use nexmart::{Money, ProductDraft};
use tracing::{info, instrument};

struct SeedProduct {
  name: &'static str,
  slug: &'static str,
  description: &'static str,
  price_cents: i64,
  category: &'static str,
  inventory: i32,
  image_url: &'static str,
}

const DEMO_PRODUCTS: [SeedProduct; 5] = [
  SeedProduct {
    name: "Cyber-Visor X1",
    slug: "cyber-visor-x1",
    description: "Advanced augmented reality visor with a holographic interface. Perfect for next-gen developers and tech enthusiasts.",
    price_cents: 79_999,
    category: "Electronics",
    inventory: 50,
    image_url: "https://images.unsplash.com/photo-1728602484721-7fa5eed36a64?ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&q=80&w=1112",
  },
  SeedProduct {
    name: "Quantum-Drive SSD 2TB",
    slug: "quantum-drive-ssd-2tb",
    description: "Blazing fast 2TB solid-state drive with quantum-dot technology. Read/write speeds up to 15,000 MB/s.",
    price_cents: 24_999,
    category: "Components",
    inventory: 200,
    image_url: "https://images.unsplash.com/photo-1677086586945-ef95ab632232?ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&q=80&w=1374",
  },
  SeedProduct {
    name: "Auto-Brewer 9000",
    slug: "auto-brewer-9000",
    description: "Smart coffee maker that syncs with your alarm. Grinds fresh beans and brews your perfect cup every time.",
    price_cents: 12_999,
    category: "Appliances",
    inventory: 120,
    image_url: "https://images.unsplash.com/photo-1608354580875-30bd4168b351?ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&q=80&w=687",
  },
  SeedProduct {
    name: "Ergo-Flow Keyboard",
    slug: "ergo-flow-keyboard",
    description: "Split ergonomic mechanical keyboard with quiet switches and customizable RGB backlighting. Type for hours in comfort.",
    price_cents: 17_999,
    category: "Peripherals",
    inventory: 75,
    image_url: "https://images.unsplash.com/photo-1653786146814-fc617f0de776?ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&q=80&w=1470",
  },
  SeedProduct {
    name: "Aether-Frame 32\" 4K",
    slug: "aether-frame-32-4k",
    description: "A \"floating\" 4K monitor with an edgeless display and 1ms response time. Certified for professional color grading.",
    price_cents: 59_999,
    category: "Monitors",
    inventory: 40,
    image_url: "https://images.unsplash.com/photo-1551645120-d70bfe84c826?q=80&w=1932&auto=format&fit=crop",
  },
];

impl SeedProduct {
  fn draft(&self) -> ProductDraft {
    ProductDraft {
      name: self.name.to_string(),
      slug: self.slug.to_string(),
      description: Some(self.description.to_string()),
      price: Money::from_cents(self.price_cents),
      category: Some(self.category.to_string()),
      inventory: self.inventory,
      image_url: Some(self.image_url.to_string()),
    }
  }
}

/// Upserts the demo catalog by slug. Returns how many products were written.
#[instrument(name = "seed::demo_products", skip(products))]
pub async fn seed_products(products: &dyn ProductRepository) -> Result<usize> {
  for seed in &DEMO_PRODUCTS {
    products.upsert_by_slug(seed.draft()).await?;
  }
  info!("Successfully seeded database with {} products.", DEMO_PRODUCTS.len());
  Ok(DEMO_PRODUCTS.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::MemoryProductRepository;

  #[actix_rt::test]
  async fn seeding_twice_does_not_duplicate() {
    let repo = MemoryProductRepository::new();
    assert_eq!(seed_products(&repo).await.unwrap(), 5);
    assert_eq!(seed_products(&repo).await.unwrap(), 5);

    let all = repo.list_by_name().await.unwrap();
    assert_eq!(all.len(), 5);
    let visor = repo.find_by_slug("cyber-visor-x1").await.unwrap().unwrap();
    assert_eq!(visor.price().to_string(), "799.99");
    assert_eq!(visor.inventory, 50);
  }
}
