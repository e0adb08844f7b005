// server/src/services/credential_sweeper.rs
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::db::AuthRepository;

/// Periodically deletes expired login tokens and sessions.
///
/// Runs until the returned handle is aborted or the runtime shuts down.
pub fn spawn(auth: Arc<dyn AuthRepository>, every: Duration) -> tokio::task::JoinHandle<()> {
  info!(every_secs = every.as_secs(), "Starting credential sweeper.");
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(every);
    loop {
      ticker.tick().await;
      match auth.purge_expired(Utc::now()).await {
        Ok(purged) => debug!(purged, "Credential sweep finished."),
        Err(e) => warn!(error = %e, "Credential sweep failed."),
      }
    }
  })
}
