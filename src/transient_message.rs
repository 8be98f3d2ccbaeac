use super::*;

#[derive(Clone)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  restore: String,
}

impl TransientMessage {
  const TTL: Duration = Duration::from_secs(4);

  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  pub(crate) fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }

  pub(crate) fn new(current: String, restore: String) -> Self {
    Self {
      expires_at: Instant::now() + Self::TTL,
      current,
      restore,
    }
  }

  /// The status line to go back to once this message expires.
  pub(crate) fn restore(&self) -> &str {
    &self.restore
  }
}
