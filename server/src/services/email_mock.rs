// server/src/services/email_mock.rs
use crate::errors::Result as AppResult;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::info;

/// Oldest entries are dropped past this many messages.
const OUTBOX_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct SentEmail {
  pub to: String,
  pub from: String,
  pub subject: String,
  pub html_body: String,
  pub message_id: String,
}

/// Logs outgoing mail and keeps it in an in-memory outbox instead of delivering it.
#[derive(Debug, Clone)]
pub struct MockMailer {
  sender: String,
  outbox: Arc<Mutex<VecDeque<SentEmail>>>,
}

impl MockMailer {
  pub fn new(sender: impl Into<String>) -> Self {
    Self {
      sender: sender.into(),
      outbox: Arc::new(Mutex::new(VecDeque::new())),
    }
  }

  pub fn sender(&self) -> &str {
    &self.sender
  }

  pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<SentEmail> {
    info!(
      "Simulating sending email: To='{}', From='{}', Subject='{}'",
      to, self.sender, subject
    );

    let message_id = format!("mock_email_{}", uuid::Uuid::new_v4());
    let email = SentEmail {
      to: to.to_string(),
      from: self.sender.clone(),
      subject: subject.to_string(),
      html_body: html_body.to_string(),
      message_id,
    };

    let mut outbox = self.outbox.lock();
    if outbox.len() == OUTBOX_CAPACITY {
      outbox.pop_front();
    }
    outbox.push_back(email.clone());
    info!("Mock email sent successfully. Message ID: {}", email.message_id);
    Ok(email)
  }

  /// Most recent message addressed to `to`.
  pub fn last_sent_to(&self, to: &str) -> Option<SentEmail> {
    self.outbox.lock().iter().rev().find(|email| email.to.eq_ignore_ascii_case(to)).cloned()
  }

  pub fn sent_count(&self) -> usize {
    self.outbox.lock().len()
  }
}
