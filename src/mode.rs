use super::*;

pub(crate) enum Mode {
  Compose(ComposeForm),
  LanguagePicker(Picker<Language>),
  LimitPicker(Picker<usize>),
  Panel,
}

impl Mode {
  fn compose_key(key: KeyEvent) -> Command {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Esc => Command::CancelCompose,
      KeyCode::Enter => Command::SubmitCompose,
      KeyCode::Tab | KeyCode::BackTab => Command::ToggleComposeField,
      KeyCode::Backspace => Command::ComposeBackspace,
      KeyCode::Char(_)
        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER) =>
      {
        Command::None
      }
      KeyCode::Char(ch) => Command::ComposeInput(ch),
      _ => Command::None,
    }
  }

  pub(crate) fn handle_key(&self, key: KeyEvent) -> Command {
    match self {
      Mode::Panel => Self::panel_key(key),
      Mode::Compose(_) => Self::compose_key(key),
      Mode::LanguagePicker(_) | Mode::LimitPicker(_) => Self::picker_key(key),
    }
  }

  fn panel_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
      KeyCode::Home => Command::SelectFirst,
      KeyCode::End => Command::SelectLast,
      KeyCode::Char('d') | KeyCode::Delete => Command::DeleteSelected,
      KeyCode::Char('D') => Command::DeleteAll,
      KeyCode::Char('n') => Command::StartCompose,
      KeyCode::Char('L') => Command::ShowLimitPicker,
      KeyCode::Char('t') => Command::ShowLanguagePicker,
      KeyCode::Char('r') => Command::Reload,
      KeyCode::Char('o' | 'O') => Command::OpenSessionUrl,
      _ => Command::None,
    }
  }

  fn picker_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Esc => Command::ClosePicker,
      KeyCode::Enter => Command::ConfirmPicker,
      KeyCode::Down | KeyCode::Char('j') => Command::PickerNext,
      KeyCode::Up | KeyCode::Char('k') => Command::PickerPrevious,
      _ => Command::None,
    }
  }

  pub(crate) fn status(&self) -> &'static str {
    match self {
      Mode::Panel => PANEL_STATUS,
      Mode::Compose(_) => COMPOSE_STATUS,
      Mode::LanguagePicker(_) | Mode::LimitPicker(_) => PICKER_STATUS,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn panel_keys() {
    let mode = Mode::Panel;

    assert_eq!(mode.handle_key(key(KeyCode::Char('D'))), Command::DeleteAll);
    assert_eq!(
      mode.handle_key(key(KeyCode::Char('d'))),
      Command::DeleteSelected
    );
    assert_eq!(mode.handle_key(key(KeyCode::Char('t'))), Command::ShowLanguagePicker);
    assert_eq!(mode.handle_key(key(KeyCode::Esc)), Command::Quit);
  }

  #[test]
  fn compose_captures_letters_that_are_panel_shortcuts() {
    let mode = Mode::Compose(ComposeForm::new("ada"));

    assert_eq!(
      mode.handle_key(key(KeyCode::Char('q'))),
      Command::ComposeInput('q')
    );
    assert_eq!(mode.handle_key(key(KeyCode::Esc)), Command::CancelCompose);
    assert_eq!(
      mode.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
      Command::None
    );
  }

  #[test]
  fn picker_keys() {
    let mode = Mode::LimitPicker(Picker::limits(5));

    assert_eq!(mode.handle_key(key(KeyCode::Enter)), Command::ConfirmPicker);
    assert_eq!(mode.handle_key(key(KeyCode::Char('j'))), Command::PickerNext);
    assert_eq!(mode.handle_key(key(KeyCode::Esc)), Command::ClosePicker);
  }
}
