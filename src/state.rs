use super::*;

pub(crate) struct State {
  comments: ListView<Comment>,
  default_limit: usize,
  help: HelpView,
  language: Language,
  load_error: Option<String>,
  message: String,
  mode: Mode,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_load: Option<PendingLoad>,
  prompt: Option<Prompt>,
  session: Option<SessionInfo>,
  store: LocalStore,
  transient_message: Option<TransientMessage>,
  translation: Option<String>,
}

impl State {
  fn cancel_compose(&mut self) {
    if matches!(self.mode, Mode::Compose(_)) {
      self.mode = Mode::Panel;
      self.restore_status();
    }
  }

  fn close_picker(&mut self) {
    if matches!(self.mode, Mode::LanguagePicker(_) | Mode::LimitPicker(_)) {
      self.mode = Mode::Panel;
      self.restore_status();
    }
  }

  pub(crate) fn comments(&self) -> &[Comment] {
    self.comments.items()
  }

  fn confirm_picker(&mut self) -> Result {
    match std::mem::replace(&mut self.mode, Mode::Panel) {
      Mode::LimitPicker(picker) => {
        self.restore_status();

        if let Some(limit) = picker.selected() {
          self.set_limit(limit)?;
        }
      }
      Mode::LanguagePicker(picker) => {
        self.restore_status();

        if let Some(language) = picker.selected() {
          self.translate_displayed(language);
        }
      }
      mode => self.mode = mode,
    }

    Ok(())
  }

  fn delete_all(&mut self) {
    self.set_busy_message(DELETING_STATUS);
    self.pending_effects.push(Effect::DeleteAll);
  }

  fn delete_comment(&mut self, comment_id: i64) {
    self.set_busy_message(DELETING_STATUS);
    self.pending_effects.push(Effect::DeleteComment { comment_id });
  }

  fn delete_selected(&mut self) {
    if self.translation.is_some() {
      self.set_transient_message(
        "Switch back to English to delete comments".to_string(),
      );
      return;
    }

    let Some(comment) = self.comments.selected_item() else {
      return;
    };

    if self.store.viewer().can_delete(comment) {
      let comment_id = comment.id;
      self.delete_comment(comment_id);
    } else {
      self.set_transient_message(
        "You can only delete your own comments".to_string(),
      );
    }
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.hide_help(),
      Command::SelectNext => self.comments.select_next(),
      Command::SelectPrevious => self.comments.select_previous(),
      Command::SelectFirst => self.comments.set_selected(0),
      Command::SelectLast => self.comments.select_last(),
      Command::Reload => self.reload(),
      Command::SetLimit(limit) => self.set_limit(limit)?,
      Command::Translate(language) => self.translate_displayed(language),
      Command::DeleteAll => self.delete_all(),
      Command::DeleteComment(comment_id) => self.delete_comment(comment_id),
      Command::DeleteSelected => self.delete_selected(),
      Command::ShowLimitPicker => {
        self.mode = Mode::LimitPicker(Picker::limits(self.limit()));
        self.message = PICKER_STATUS.into();
      }
      Command::ShowLanguagePicker => {
        self.mode = Mode::LanguagePicker(Picker::languages(self.language));
        self.message = PICKER_STATUS.into();
      }
      Command::PickerNext => match &mut self.mode {
        Mode::LanguagePicker(picker) => picker.select_next(),
        Mode::LimitPicker(picker) => picker.select_next(),
        Mode::Compose(_) | Mode::Panel => {}
      },
      Command::PickerPrevious => match &mut self.mode {
        Mode::LanguagePicker(picker) => picker.select_previous(),
        Mode::LimitPicker(picker) => picker.select_previous(),
        Mode::Compose(_) | Mode::Panel => {}
      },
      Command::ConfirmPicker => self.confirm_picker()?,
      Command::ClosePicker => self.close_picker(),
      Command::StartCompose => self.start_compose(),
      Command::ComposeInput(ch) => {
        if let Mode::Compose(form) = &mut self.mode {
          form.input(ch);
        }
      }
      Command::ComposeBackspace => {
        if let Mode::Compose(form) = &mut self.mode {
          form.backspace();
        }
      }
      Command::ToggleComposeField => {
        if let Mode::Compose(form) = &mut self.mode {
          form.toggle_focus();
        }
      }
      Command::SubmitCompose => self.submit_compose(),
      Command::CancelCompose => self.cancel_compose(),
      Command::OpenSessionUrl => self.open_session_url(),
      Command::OpenPromptUrl => self.open_prompt_url(),
      Command::DismissPrompt => {
        self.prompt = None;
        self.restore_status();
      }
      Command::None => {}
    }

    Ok(CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  /// Applies the result of a finished effect and returns any follow-up
  /// effects it triggers.
  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    match event {
      Event::Comments { request_id, result } => {
        if let Some(pending) = self.take_pending_load(request_id) {
          match result {
            Ok(comments) => {
              self.show_comments(comments, pending.language, None);
            }
            Err(error) => {
              self.load_error = Some(error.to_string());
              self.set_transient_message(format!(
                "Could not load comments: {error}"
              ));
            }
          }
        }
      }
      Event::Translation { request_id, result } => {
        if let Some(pending) = self.take_pending_load(request_id) {
          match result {
            Ok((comments, markup)) => {
              self.show_comments(comments, pending.language, Some(markup));
            }
            Err(error) => {
              self.load_error = Some(format!("{error:#}"));
              self.set_transient_message(format!(
                "Could not translate comments: {error:#}"
              ));
            }
          }
        }
      }
      Event::Session { result } => match result {
        Ok(session) => {
          if let Err(error) = self.store.remember_session(&session) {
            self.set_transient_message(format!(
              "Could not save session: {error}"
            ));
          }

          self.session = Some(session);
        }
        Err(error) => {
          self.set_transient_message(format!(
            "Could not check sign-in status: {error}"
          ));
        }
      },
      Event::AllDeleted { result } => match result {
        Ok(Deletion::Deleted) => {
          self.load_comments(self.limit());
          self.set_transient_message("Deleted all comments".to_string());
        }
        Ok(Deletion::Denied) => {
          self.restore_status();
          self.prompt = Some(Prompt::permission(self.session.as_ref()));
          self.message = PROMPT_STATUS.into();
        }
        Err(error) => {
          self.set_transient_message(format!(
            "Could not delete comments: {error}"
          ));
        }
      },
      Event::CommentDeleted { comment_id, result } => match result {
        Ok(Deletion::Deleted) => {
          self.load_comments(self.limit());
          self.set_transient_message(format!("Deleted comment {comment_id}"));
        }
        Ok(Deletion::Denied) => {
          self.set_transient_message(format!(
            "Not allowed to delete comment {comment_id}"
          ));
        }
        Err(error) => {
          self.set_transient_message(format!(
            "Could not delete comment {comment_id}: {error}"
          ));
        }
      },
      Event::CommentSubmitted { result } => match result {
        Ok(()) => {
          self.load_comments(self.limit());
          self.set_transient_message("Comment posted".to_string());
        }
        Err(error) => {
          self.set_transient_message(format!("Could not post comment: {error}"));
        }
      },
    }

    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  /// Hides the help overlay. The status saved when help opened may be stale
  /// by now, so anything but a still-live transient message is recomputed.
  fn hide_help(&mut self) {
    self.help.hide(&mut self.message);

    let transient_is_live = self
      .transient_message
      .as_ref()
      .is_some_and(|transient| transient.current() == self.message);

    if self.prompt.is_some() {
      self.message = PROMPT_STATUS.into();
    } else if !transient_is_live {
      self.restore_status();
    }
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.pending_load.is_some()
  }

  pub(crate) fn language(&self) -> Language {
    self.language
  }

  /// The display limit: whatever was last chosen, otherwise the configured
  /// default.
  pub(crate) fn limit(&self) -> usize {
    self.store.limit().unwrap_or(self.default_limit)
  }

  pub(crate) fn list_offset(&self) -> usize {
    self.comments.offset()
  }

  fn load_comments(&mut self, limit: usize) {
    let request_id = self.next_request_id();

    self.pending_load = Some(PendingLoad {
      language: Language::DEFAULT,
      request_id,
    });

    self.set_busy_message(LOADING_COMMENTS_STATUS);

    self
      .pending_effects
      .push(Effect::FetchComments { limit, request_id });
  }

  pub(crate) fn load_error(&self) -> Option<&str> {
    self.load_error.as_deref()
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  pub(crate) fn new(store: LocalStore, default_limit: usize) -> Self {
    Self {
      comments: ListView::default(),
      default_limit,
      help: HelpView::new(),
      language: Language::DEFAULT,
      load_error: None,
      message: PANEL_STATUS.into(),
      mode: Mode::Panel,
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_load: None,
      prompt: None,
      session: None,
      store,
      transient_message: None,
      translation: None,
    }
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  fn open_prompt_url(&mut self) {
    if let Some(url) = self.prompt.take().and_then(|prompt| prompt.url) {
      self.pending_effects.push(Effect::OpenUrl { url });
    }

    self.restore_status();
  }

  fn open_session_url(&mut self) {
    match &self.session {
      Some(session) if !session.url.is_empty() => {
        let url = session.url.clone();
        self.pending_effects.push(Effect::OpenUrl { url });
      }
      _ => {
        self.set_transient_message(
          "Sign-in status is not known yet, press r to retry".to_string(),
        );
      }
    }
  }

  pub(crate) fn prompt(&self) -> Option<&Prompt> {
    self.prompt.as_ref()
  }

  fn refresh_session(&mut self) {
    self.pending_effects.push(Effect::FetchSession);
  }

  fn reload(&mut self) {
    self.refresh_session();

    if self.language.is_default() {
      self.load_comments(self.limit());
    } else {
      self.translate_displayed(self.language);
    }
  }

  fn restore_status(&mut self) {
    if self.help.is_visible() {
      return;
    }

    self.transient_message = None;

    self.message = if self.pending_load.is_some() {
      LOADING_COMMENTS_STATUS.into()
    } else {
      self.mode.status().into()
    };
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.comments.selected_index()
  }

  pub(crate) fn session(&self) -> Option<&SessionInfo> {
    self.session.as_ref()
  }

  fn set_busy_message(&mut self, message: &str) {
    if !self.help.is_visible() {
      self.transient_message = None;
      self.message = message.into();
    }
  }

  fn set_limit(&mut self, limit: usize) -> Result {
    self
      .store
      .set_limit(limit)
      .context("could not save display limit")?;

    self.load_comments(limit);

    Ok(())
  }

  pub(crate) fn set_list_offset(&mut self, offset: usize) {
    self.comments.set_offset(offset);
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    if self.help.is_visible() {
      return;
    }

    let restore = if self.pending_load.is_some() {
      LOADING_COMMENTS_STATUS.to_string()
    } else {
      self.mode.status().to_string()
    };

    self.transient_message =
      Some(TransientMessage::new(message.clone(), restore));

    self.message = message;
  }

  fn show_comments(
    &mut self,
    comments: Vec<Comment>,
    language: Language,
    translation: Option<String>,
  ) {
    self.comments.replace(comments);
    self.language = language;
    self.load_error = None;
    self.translation = translation;
    self.restore_status();
  }

  fn start_compose(&mut self) {
    match &self.session {
      Some(session) if session.is_logged_in => {
        self.mode = Mode::Compose(ComposeForm::new(&session.nickname));
        self.message = COMPOSE_STATUS.into();
      }
      _ => {
        self.prompt = Some(Prompt::sign_in(self.session.as_ref()));
        self.message = PROMPT_STATUS.into();
      }
    }
  }

  fn submit_compose(&mut self) {
    let Mode::Compose(form) = &self.mode else {
      return;
    };

    if !form.is_ready() {
      self.set_transient_message("Write something first".to_string());
      return;
    }

    let effect = Effect::SubmitComment {
      name: form.name.trim().to_string(),
      nickname: form.nickname.clone(),
      text: form.comment.trim().to_string(),
    };

    self.mode = Mode::Panel;
    self.set_busy_message(POSTING_STATUS);
    self.pending_effects.push(effect);
  }

  fn take_pending_load(&mut self, request_id: u64) -> Option<PendingLoad> {
    if self
      .pending_load
      .as_ref()
      .is_some_and(|pending| pending.request_id == request_id)
    {
      self.pending_load.take()
    } else {
      debug!(request_id, "dropping stale comment response");
      None
    }
  }

  fn translate_displayed(&mut self, language: Language) {
    if language.is_default() {
      self.load_comments(self.limit());
      return;
    }

    let request_id = self.next_request_id();

    self.pending_load = Some(PendingLoad {
      language,
      request_id,
    });

    self.set_busy_message(LOADING_COMMENTS_STATUS);

    self.pending_effects.push(Effect::Translate {
      language,
      limit: self.limit(),
      request_id,
    });
  }

  pub(crate) fn translation(&self) -> Option<(Language, &str)> {
    self
      .translation
      .as_deref()
      .map(|markup| (self.language, markup))
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.restore().to_string();
        self.transient_message = None;
      }
    }
  }

  pub(crate) fn viewer(&self) -> Viewer {
    self.store.viewer()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fresh_state() -> State {
    let path = store::temp_store_path("state");
    State::new(LocalStore::load(path).expect("load store"), 5)
  }

  fn signed_in(user_id: &str, is_admin: bool) -> SessionInfo {
    SessionInfo {
      is_admin,
      is_logged_in: true,
      nickname: "ada".to_string(),
      url: "/_ah/logout".to_string(),
      user_id: Some(user_id.to_string()),
    }
  }

  fn signed_out() -> SessionInfo {
    SessionInfo {
      url: "/_ah/login".to_string(),
      ..SessionInfo::default()
    }
  }

  fn fetch_request(effects: &[Effect]) -> (usize, u64) {
    effects
      .iter()
      .find_map(|effect| match effect {
        Effect::FetchComments { limit, request_id } => Some((*limit, *request_id)),
        _ => None,
      })
      .expect("a comment fetch was queued")
  }

  fn loaded_state(comments: Vec<Comment>) -> State {
    let mut state = fresh_state();

    let dispatch = state.dispatch_command(Command::Reload).unwrap();
    let (_, request_id) = fetch_request(&dispatch.effects);

    state.handle_event(Event::Comments {
      request_id,
      result: Ok(comments),
    });

    state
  }

  fn rows(view: &PanelView) -> &[CommentRow] {
    match &view.body {
      PanelBody::Comments(rows) => rows,
      other => panic!("expected comment rows, got {other:?}"),
    }
  }

  fn translate_request(effects: &[Effect]) -> u64 {
    effects
      .iter()
      .find_map(|effect| match effect {
        Effect::Translate { request_id, .. } => Some(*request_id),
        _ => None,
      })
      .expect("a translation was queued")
  }

  #[test]
  fn reload_fetches_session_and_comments_with_default_limit() {
    let mut state = fresh_state();

    let dispatch = state.dispatch_command(Command::Reload).unwrap();

    assert!(!dispatch.should_exit);
    assert!(dispatch.effects.contains(&Effect::FetchSession));
    assert_eq!(fetch_request(&dispatch.effects).0, 5);
    assert_eq!(state.message(), LOADING_COMMENTS_STATUS);
    assert_eq!(panel::render(&state, 80).body, PanelBody::Loading);
  }

  #[test]
  fn loaded_comments_render_one_row_each_in_order() {
    let state = loaded_state(vec![
      comment::sample_comment(9, "u1"),
      comment::sample_comment(4, "u2"),
      comment::sample_comment(6, "u3"),
    ]);

    let view = panel::render(&state, 80);

    assert_eq!(
      rows(&view).iter().map(|row| row.id).collect::<Vec<_>>(),
      vec![9, 4, 6]
    );

    assert_eq!(view.selected, Some(0));
    assert!(!state.is_loading());
  }

  #[test]
  fn empty_response_renders_placeholder() {
    let state = loaded_state(Vec::new());

    assert_eq!(panel::render(&state, 80).body, PanelBody::Placeholder);
  }

  #[test]
  fn stale_comment_response_is_ignored() {
    let mut state = fresh_state();

    let first = state.dispatch_command(Command::Reload).unwrap();
    let (_, stale_id) = fetch_request(&first.effects);

    let second = state.dispatch_command(Command::SetLimit(2)).unwrap();
    let (limit, fresh_id) = fetch_request(&second.effects);
    assert_eq!(limit, 2);

    state.handle_event(Event::Comments {
      request_id: fresh_id,
      result: Ok(vec![comment::sample_comment(1, "u1")]),
    });

    state.handle_event(Event::Comments {
      request_id: stale_id,
      result: Ok(vec![
        comment::sample_comment(2, "u1"),
        comment::sample_comment(3, "u1"),
        comment::sample_comment(4, "u1"),
      ]),
    });

    let ids = state.comments().iter().map(|c| c.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1]);
  }

  #[test]
  fn failed_load_keeps_previous_comments() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "u1")]);

    let dispatch = state.dispatch_command(Command::Reload).unwrap();
    let (_, request_id) = fetch_request(&dispatch.effects);

    state.handle_event(Event::Comments {
      request_id,
      result: Err(anyhow::anyhow!("connection refused")),
    });

    assert_eq!(state.comments().len(), 1);
    assert!(state.message().contains("connection refused"));
  }

  #[test]
  fn first_load_failure_is_not_shown_as_empty() {
    let mut state = fresh_state();

    let dispatch = state.dispatch_command(Command::Reload).unwrap();
    let (_, request_id) = fetch_request(&dispatch.effects);

    state.handle_event(Event::Comments {
      request_id,
      result: Err(anyhow::anyhow!("connection refused")),
    });

    assert_eq!(
      panel::render(&state, 80).body,
      PanelBody::LoadFailed("connection refused".to_string())
    );

    state.dispatch_command(Command::Reload).unwrap();

    assert_eq!(panel::render(&state, 80).body, PanelBody::Loading);
  }

  #[test]
  fn failed_limit_save_keeps_limit_and_list() {
    let path = store::temp_store_path("unwritable_limit");

    let mut state = State::new(LocalStore::load(path.clone()).unwrap(), 5);

    let dispatch = state.dispatch_command(Command::Reload).unwrap();
    let (_, request_id) = fetch_request(&dispatch.effects);

    state.handle_event(Event::Comments {
      request_id,
      result: Ok((1..=5).map(|id| comment::sample_comment(id, "u1")).collect()),
    });

    fs::create_dir_all(&path).unwrap();

    let Err(error) = state.dispatch_command(Command::SetLimit(1)) else {
      panic!("saving into a directory should fail");
    };

    assert!(format!("{error:#}").contains("could not save display limit"));
    assert!(!state.is_loading());
    assert_eq!(state.limit(), 5);

    let view = panel::render(&state, 80);
    assert_eq!(view.limit, 5);
    assert!(rows(&view).len() <= view.limit);

    let _ = fs::remove_dir(path);
  }

  #[test]
  fn closing_help_after_a_load_finishes_drops_the_busy_status() {
    let mut state = fresh_state();

    let dispatch = state.dispatch_command(Command::Reload).unwrap();
    let (_, request_id) = fetch_request(&dispatch.effects);
    assert_eq!(state.message(), LOADING_COMMENTS_STATUS);

    state.dispatch_command(Command::ShowHelp).unwrap();
    assert_eq!(state.message(), HELP_STATUS);

    state.handle_event(Event::Comments {
      request_id,
      result: Ok(vec![comment::sample_comment(1, "u1")]),
    });

    state.dispatch_command(Command::HideHelp).unwrap();

    assert!(!state.help_is_visible());
    assert_eq!(state.message(), PANEL_STATUS);
  }

  #[test]
  fn set_limit_persists_and_later_loads_reuse_it() {
    let path = store::temp_store_path("limit_reuse");

    let mut state = State::new(LocalStore::load(path.clone()).unwrap(), 5);

    let dispatch = state.dispatch_command(Command::SetLimit(20)).unwrap();
    assert_eq!(fetch_request(&dispatch.effects).0, 20);

    let mut restarted = State::new(LocalStore::load(path.clone()).unwrap(), 5);
    assert_eq!(restarted.limit(), 20);

    let dispatch = restarted.dispatch_command(Command::Reload).unwrap();
    assert_eq!(fetch_request(&dispatch.effects).0, 20);

    let _ = fs::remove_file(path);
  }

  #[test]
  fn limit_picker_confirms_into_a_reload() {
    let mut state = fresh_state();

    state.dispatch_command(Command::ShowLimitPicker).unwrap();
    assert!(matches!(state.mode(), Mode::LimitPicker(_)));

    state.dispatch_command(Command::PickerNext).unwrap();
    let dispatch = state.dispatch_command(Command::ConfirmPicker).unwrap();

    assert_eq!(fetch_request(&dispatch.effects).0, 10);
    assert!(matches!(state.mode(), Mode::Panel));
    assert_eq!(state.limit(), 10);
  }

  #[test]
  fn delete_controls_follow_ownership() {
    let mut state = loaded_state(vec![
      comment::sample_comment(1, "me"),
      comment::sample_comment(2, "someone-else"),
    ]);

    state.handle_event(Event::Session {
      result: Ok(signed_in("me", false)),
    });

    let view = panel::render(&state, 80);
    let flags = rows(&view).iter().map(|row| row.deletable).collect::<Vec<_>>();
    assert_eq!(flags, vec![true, false]);

    state.handle_event(Event::Session {
      result: Ok(signed_in("me", true)),
    });

    let view = panel::render(&state, 80);
    assert!(rows(&view).iter().all(|row| row.deletable));
  }

  #[test]
  fn deleting_someone_elses_comment_is_refused_locally() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "other")]);

    state.handle_event(Event::Session {
      result: Ok(signed_in("me", false)),
    });

    let dispatch = state.dispatch_command(Command::DeleteSelected).unwrap();

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.message(), "You can only delete your own comments");
  }

  #[test]
  fn deleting_own_comment_reloads_on_success() {
    let mut state = loaded_state(vec![comment::sample_comment(7, "me")]);

    state.handle_event(Event::Session {
      result: Ok(signed_in("me", false)),
    });

    let dispatch = state.dispatch_command(Command::DeleteSelected).unwrap();
    assert_eq!(dispatch.effects, vec![Effect::DeleteComment { comment_id: 7 }]);

    let effects = state.handle_event(Event::CommentDeleted {
      comment_id: 7,
      result: Ok(Deletion::Deleted),
    });

    assert_eq!(fetch_request(&effects).0, 5);
  }

  #[test]
  fn denied_delete_all_keeps_list_and_prompts() {
    let mut state = loaded_state(vec![
      comment::sample_comment(1, "u1"),
      comment::sample_comment(2, "u2"),
    ]);

    state.handle_event(Event::Session {
      result: Ok(signed_out()),
    });

    let dispatch = state.dispatch_command(Command::DeleteAll).unwrap();
    assert_eq!(dispatch.effects, vec![Effect::DeleteAll]);

    let effects = state.handle_event(Event::AllDeleted {
      result: Ok(Deletion::Denied),
    });

    assert!(effects.is_empty());
    assert_eq!(state.comments().len(), 2);
    assert_eq!(rows(&panel::render(&state, 80)).len(), 2);

    let prompt = state.prompt().expect("permission prompt is shown");
    assert_eq!(prompt.url.as_deref(), Some("/_ah/login"));

    let dispatch = state.dispatch_command(Command::OpenPromptUrl).unwrap();
    assert_eq!(
      dispatch.effects,
      vec![Effect::OpenUrl {
        url: "/_ah/login".to_string()
      }]
    );
    assert!(state.prompt().is_none());
  }

  #[test]
  fn successful_delete_all_reloads() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "u1")]);

    state.dispatch_command(Command::DeleteAll).unwrap();

    let effects = state.handle_event(Event::AllDeleted {
      result: Ok(Deletion::Deleted),
    });

    let (_, request_id) = fetch_request(&effects);

    state.handle_event(Event::Comments {
      request_id,
      result: Ok(Vec::new()),
    });

    assert!(state.prompt().is_none());
    assert_eq!(panel::render(&state, 80).body, PanelBody::Placeholder);
  }

  #[test]
  fn translating_replaces_displayed_content() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "u1")]);

    let spanish = Language::all()[1];

    let dispatch = state.dispatch_command(Command::Translate(spanish)).unwrap();

    let request_id = match dispatch.effects.as_slice() {
      [
        Effect::Translate {
          language,
          limit,
          request_id,
        },
      ] => {
        assert_eq!(*language, spanish);
        assert_eq!(*limit, 5);
        *request_id
      }
      other => panic!("unexpected effects {other:?}"),
    };

    state.handle_event(Event::Translation {
      request_id,
      result: Ok((
        vec![comment::sample_comment(1, "u1")],
        "<ul><li><b>autor 1</b>: comentario 1</li></ul>".to_string(),
      )),
    });

    let view = panel::render(&state, 80);

    assert_eq!(view.language, spanish);

    match view.body {
      PanelBody::Translated { language, lines } => {
        assert_eq!(language, spanish);
        assert!(lines.join(" ").contains("comentario 1"));
      }
      other => panic!("expected translated body, got {other:?}"),
    }
  }

  #[test]
  fn denied_delete_one_keeps_list_without_reloading() {
    let mut state = loaded_state(vec![
      comment::sample_comment(1, "u1"),
      comment::sample_comment(2, "u2"),
    ]);

    let dispatch = state.dispatch_command(Command::DeleteComment(2)).unwrap();
    assert_eq!(dispatch.effects, vec![Effect::DeleteComment { comment_id: 2 }]);

    let effects = state.handle_event(Event::CommentDeleted {
      comment_id: 2,
      result: Ok(Deletion::Denied),
    });

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(
      state.comments().iter().map(|c| c.id).collect::<Vec<_>>(),
      vec![1, 2]
    );
    assert_eq!(state.message(), "Not allowed to delete comment 2");
  }

  #[test]
  fn stale_translation_is_ignored() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "u1")]);

    let (spanish, french) = (Language::all()[1], Language::all()[2]);

    let first = state.dispatch_command(Command::Translate(spanish)).unwrap();
    let stale_id = translate_request(&first.effects);

    let second = state.dispatch_command(Command::Translate(french)).unwrap();
    let fresh_id = translate_request(&second.effects);

    state.handle_event(Event::Translation {
      request_id: fresh_id,
      result: Ok((
        vec![comment::sample_comment(1, "u1")],
        "<ul><li>commentaire 1</li></ul>".to_string(),
      )),
    });

    state.handle_event(Event::Translation {
      request_id: stale_id,
      result: Ok((
        vec![comment::sample_comment(1, "u1")],
        "<ul><li>comentario 1</li></ul>".to_string(),
      )),
    });

    assert_eq!(state.language(), french);

    match panel::render(&state, 80).body {
      PanelBody::Translated { language, lines } => {
        assert_eq!(language, french);
        assert!(lines.join(" ").contains("commentaire 1"));
      }
      other => panic!("expected translated body, got {other:?}"),
    }
  }

  #[test]
  fn translated_empty_result_renders_placeholder() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "u1")]);

    let dispatch = state
      .dispatch_command(Command::Translate(Language::all()[1]))
      .unwrap();

    state.handle_event(Event::Translation {
      request_id: translate_request(&dispatch.effects),
      result: Ok((Vec::new(), comments_markup(&[]))),
    });

    assert_eq!(panel::render(&state, 80).body, PanelBody::Placeholder);
  }

  #[test]
  fn default_language_just_reloads() {
    let mut state = loaded_state(vec![comment::sample_comment(1, "u1")]);

    let dispatch = state
      .dispatch_command(Command::Translate(Language::DEFAULT))
      .unwrap();

    assert_eq!(dispatch.effects.len(), 1);
    assert_eq!(fetch_request(&dispatch.effects).0, 5);
  }

  #[test]
  fn compose_requires_sign_in() {
    let mut state = fresh_state();

    state.handle_event(Event::Session {
      result: Ok(signed_out()),
    });

    state.dispatch_command(Command::StartCompose).unwrap();

    assert!(matches!(state.mode(), Mode::Panel));
    assert!(state.prompt().is_some());
  }

  #[test]
  fn submitted_comment_is_posted_then_reloaded() {
    let mut state = fresh_state();

    state.handle_event(Event::Session {
      result: Ok(signed_in("me", false)),
    });

    state.dispatch_command(Command::StartCompose).unwrap();

    for ch in "hello".chars() {
      state.dispatch_command(Command::ComposeInput(ch)).unwrap();
    }

    let dispatch = state.dispatch_command(Command::SubmitCompose).unwrap();

    assert_eq!(
      dispatch.effects,
      vec![Effect::SubmitComment {
        name: "ada".to_string(),
        nickname: "ada".to_string(),
        text: "hello".to_string(),
      }]
    );

    assert!(matches!(state.mode(), Mode::Panel));

    let effects = state.handle_event(Event::CommentSubmitted { result: Ok(()) });
    assert_eq!(fetch_request(&effects).0, 5);
  }

  #[test]
  fn quit_requests_exit() {
    let mut state = fresh_state();

    let dispatch = state.dispatch_command(Command::Quit).unwrap();

    assert!(dispatch.should_exit);
    assert!(dispatch.effects.is_empty());
  }
}
