use super::*;

/// Modal shown when the backend refuses an action that needs a signed-in
/// owner or admin.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Prompt {
  pub(crate) message: String,
  pub(crate) url: Option<String>,
}

impl Prompt {
  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('o' | 'O') => Command::OpenPromptUrl,
      KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'Q') => {
        Command::DismissPrompt
      }
      _ => Command::None,
    }
  }

  pub(crate) fn permission(session: Option<&SessionInfo>) -> Self {
    match session {
      Some(session) if session.is_logged_in => Self {
        message: format!(
          "Signed in as {}, but only admins can delete all comments. Sign in with an admin account to continue.",
          if session.nickname.is_empty() {
            "a regular user"
          } else {
            session.nickname.as_str()
          }
        ),
        url: Some(session.url.clone()),
      },
      Some(session) => Self {
        message: "Only admins can delete all comments. Sign in to continue."
          .to_string(),
        url: Some(session.url.clone()),
      },
      None => Self {
        message: "Only admins can delete all comments.".to_string(),
        url: None,
      },
    }
  }

  pub(crate) fn sign_in(session: Option<&SessionInfo>) -> Self {
    Self {
      message: "Sign in to leave a comment.".to_string(),
      url: session.map(|session| session.url.clone()),
    }
  }
}
