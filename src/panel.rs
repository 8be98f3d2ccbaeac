//! Pure description of what the comments panel shows. The terminal adapter in
//! `app.rs` draws a `PanelView`; nothing here touches the terminal.

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommentRow {
  pub(crate) body: String,
  pub(crate) deletable: bool,
  pub(crate) header: String,
  pub(crate) id: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PanelBody {
  Comments(Vec<CommentRow>),
  LoadFailed(String),
  Loading,
  Placeholder,
  Translated {
    language: Language,
    lines: Vec<String>,
  },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PanelView {
  pub(crate) body: PanelBody,
  pub(crate) language: Language,
  pub(crate) limit: usize,
  pub(crate) offset: usize,
  pub(crate) selected: Option<usize>,
  pub(crate) session: SessionLine,
  pub(crate) status: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SessionLine {
  SignedIn { is_admin: bool, nickname: String },
  SignedOut,
  Unknown,
}

impl CommentRow {
  fn new(comment: &Comment, viewer: &Viewer) -> Self {
    Self {
      body: comment.comment.clone(),
      deletable: viewer.can_delete(comment),
      header: comment.header(),
      id: comment.id,
    }
  }
}

impl SessionLine {
  fn new(session: Option<&SessionInfo>) -> Self {
    match session {
      Some(session) if session.is_logged_in => SessionLine::SignedIn {
        is_admin: session.is_admin,
        nickname: if session.nickname.is_empty() {
          "anonymous".to_string()
        } else {
          session.nickname.clone()
        },
      },
      Some(_) => SessionLine::SignedOut,
      None => SessionLine::Unknown,
    }
  }

  pub(crate) fn text(&self) -> String {
    match self {
      SessionLine::SignedIn {
        is_admin: true,
        nickname,
      } => format!("Signed in as {nickname} (admin) • o to sign out"),
      SessionLine::SignedIn { nickname, .. } => {
        format!("Signed in as {nickname} • n to comment • o to sign out")
      }
      SessionLine::SignedOut => "Sign in to leave a comment • o to sign in".into(),
      SessionLine::Unknown => LOADING_SESSION_STATUS.into(),
    }
  }
}

pub(crate) fn render(state: &State, width: usize) -> PanelView {
  let body = if state.comments().is_empty() {
    if state.is_loading() {
      PanelBody::Loading
    } else if let Some(error) = state.load_error() {
      PanelBody::LoadFailed(error.to_string())
    } else {
      PanelBody::Placeholder
    }
  } else if let Some((language, markup)) = state.translation() {
    PanelBody::Translated {
      language,
      lines: html_to_lines(markup, width),
    }
  } else {
    let viewer = state.viewer();

    PanelBody::Comments(
      state
        .comments()
        .iter()
        .map(|comment| CommentRow::new(comment, &viewer))
        .collect(),
    )
  };

  let selected = match &body {
    PanelBody::Comments(_) => state.selected_index(),
    _ => None,
  };

  PanelView {
    body,
    language: state.language(),
    limit: state.limit(),
    offset: state.list_offset(),
    selected,
    session: SessionLine::new(state.session()),
    status: state.message().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn signed_in_line_mentions_admin() {
    let line = SessionLine::SignedIn {
      is_admin: true,
      nickname: "ada".to_string(),
    };

    assert!(line.text().contains("ada (admin)"));
  }

  #[test]
  fn blank_nickname_is_shown_as_anonymous() {
    let session = SessionInfo {
      is_logged_in: true,
      url: "/logout".to_string(),
      ..SessionInfo::default()
    };

    assert_eq!(
      SessionLine::new(Some(&session)),
      SessionLine::SignedIn {
        is_admin: false,
        nickname: "anonymous".to_string(),
      }
    );
  }
}
