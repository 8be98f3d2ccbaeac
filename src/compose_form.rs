#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComposeField {
  Comment,
  Name,
}

/// Draft of a new comment. The name starts out as the viewer's nickname;
/// the backend updates the nickname when the two differ.
#[derive(Clone, Debug)]
pub(crate) struct ComposeForm {
  pub(crate) comment: String,
  pub(crate) focus: ComposeField,
  pub(crate) name: String,
  pub(crate) nickname: String,
}

impl ComposeForm {
  pub(crate) fn backspace(&mut self) {
    self.focused_mut().pop();
  }

  fn focused_mut(&mut self) -> &mut String {
    match self.focus {
      ComposeField::Comment => &mut self.comment,
      ComposeField::Name => &mut self.name,
    }
  }

  pub(crate) fn input(&mut self, ch: char) {
    self.focused_mut().push(ch);
  }

  pub(crate) fn is_ready(&self) -> bool {
    !self.comment.trim().is_empty()
  }

  pub(crate) fn new(nickname: &str) -> Self {
    Self {
      comment: String::new(),
      focus: if nickname.is_empty() {
        ComposeField::Name
      } else {
        ComposeField::Comment
      },
      name: nickname.to_string(),
      nickname: nickname.to_string(),
    }
  }

  pub(crate) fn toggle_focus(&mut self) {
    self.focus = match self.focus {
      ComposeField::Comment => ComposeField::Name,
      ComposeField::Name => ComposeField::Comment,
    };
  }
}
