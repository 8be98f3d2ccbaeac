use super::*;

/// The comment load the panel is waiting on. Responses carrying any other
/// request id are stale and get dropped.
pub(crate) struct PendingLoad {
  pub(crate) language: Language,
  pub(crate) request_id: u64,
}
