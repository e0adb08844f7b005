// server/src/services/cart_sweeper.rs
use nexmart::CartSessions;
use std::time::Duration;
use tracing::{debug, info};

/// Periodically ends cart sessions that have been idle for longer than `idle_ttl`.
///
/// Runs until the returned handle is aborted or the runtime shuts down.
pub fn spawn(carts: CartSessions, idle_ttl: Duration, every: Duration) -> tokio::task::JoinHandle<()> {
  info!(
    idle_ttl_secs = idle_ttl.as_secs(),
    every_secs = every.as_secs(),
    "Starting cart session sweeper."
  );
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(every);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
      ticker.tick().await;
      let ended = carts.sweep_idle(idle_ttl);
      debug!(ended, active = carts.len(), "Cart sweep finished.");
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  #[tokio::test]
  async fn sweeper_ends_idle_sessions() {
    let carts = CartSessions::new();
    carts.open(Uuid::new_v4());
    assert_eq!(carts.len(), 1);

    let handle = spawn(carts.clone(), Duration::from_millis(10), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(150)).await;
    handle.abort();

    assert!(carts.is_empty());
  }
}
