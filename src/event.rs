use super::*;

pub(crate) enum Event {
  AllDeleted {
    result: Result<Deletion>,
  },
  CommentDeleted {
    comment_id: i64,
    result: Result<Deletion>,
  },
  CommentSubmitted {
    result: Result,
  },
  Comments {
    request_id: u64,
    result: Result<Vec<Comment>>,
  },
  Session {
    result: Result<SessionInfo>,
  },
  Translation {
    request_id: u64,
    result: Result<(Vec<Comment>, String)>,
  },
}

impl Event {
  pub(crate) fn error(&self) -> Option<&anyhow::Error> {
    match self {
      Event::AllDeleted { result } | Event::CommentDeleted { result, .. } => {
        result.as_ref().err()
      }
      Event::CommentSubmitted { result } => result.as_ref().err(),
      Event::Comments { result, .. } => result.as_ref().err(),
      Event::Session { result } => result.as_ref().err(),
      Event::Translation { result, .. } => result.as_ref().err(),
    }
  }
}
