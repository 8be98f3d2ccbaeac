use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  DeleteAll,
  DeleteComment {
    comment_id: i64,
  },
  FetchComments {
    limit: usize,
    request_id: u64,
  },
  FetchSession,
  OpenUrl {
    url: String,
  },
  SubmitComment {
    name: String,
    nickname: String,
    text: String,
  },
  Translate {
    language: Language,
    limit: usize,
    request_id: u64,
  },
}
