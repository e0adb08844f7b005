// core/examples/cart_sessions.rs

use chrono::Utc;
use nexmart::{CartSessions, Money, Product, ProductDraft, ShopResult};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

fn product(name: &str, price: &str) -> ShopResult<Product> {
  let draft = ProductDraft {
    name: name.to_string(),
    slug: name.to_lowercase().replace(' ', "-"),
    description: None,
    price: Money::parse(price)?,
    category: None,
    inventory: 10,
    image_url: None,
  };
  Ok(Product::from_draft(Uuid::new_v4(), draft, Utc::now()))
}

#[tokio::main]
async fn main() -> ShopResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Cart Sessions Example ---");

  let sessions = CartSessions::new();
  let visor = product("Cyber-Visor X1", "799.99")?;
  let brewer = product("Auto-Brewer 9000", "129.99")?;

  // Two visitors, two independent carts.
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  let alice_cart = sessions.open(alice);
  alice_cart.add_item(visor.clone());
  alice_cart.add_item(visor.clone());
  alice_cart.add_item(brewer.clone());

  // Handles are cheap clones of the same cart; a spawned task sees the same state.
  let background = alice_cart.clone();
  tokio::spawn(async move { background.decrease_quantity(visor.id) })
    .await
    .ok();

  let bob_cart = sessions.open(bob);
  bob_cart.add_item(brewer);
  bob_cart.toggle();

  for (who, cart) in [("alice", &alice_cart), ("bob", &bob_cart)] {
    let snapshot = cart.snapshot();
    info!(
      "{}: {} items, total {}, open: {}",
      who,
      snapshot.total_items(),
      snapshot.total(),
      snapshot.is_open()
    );
    for line in snapshot.items() {
      info!("  {} x{} = {}", line.product().name, line.quantity(), line.line_total());
    }
  }

  sessions.end(bob);
  tokio::time::sleep(Duration::from_millis(20)).await;
  let expired = sessions.sweep_idle(Duration::from_millis(10));
  info!("Expired {} idle session(s); {} remaining.", expired, sessions.len());

  info!("--- Cart Sessions Example Finished ---");
  Ok(())
}
