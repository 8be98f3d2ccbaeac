use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(
    row: &CommentRow,
    available_width: u16,
  ) -> ListItem<'static> {
    let marker = if row.deletable { "[x] " } else { "    " };

    let lines = std::iter::once(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(marker, Style::default().fg(Color::Red)),
      Span::styled(row.header.clone(), Style::default().fg(Color::White)),
      Span::styled(
        format!("  #{}", row.id),
        Style::default().fg(Color::DarkGray),
      ),
    ]))
    .chain(
      wrap_text(
        &row.body,
        usize::from(available_width).saturating_sub(6).max(1),
      )
      .into_iter()
      .map(|line| {
        Line::from(vec![
          Span::raw(format!("{BASE_INDENT}    ")),
          Span::styled(line, Style::default().fg(Color::DarkGray)),
        ])
      }),
    )
    .chain(std::iter::once(Line::from(Span::raw(BASE_INDENT))))
    .collect::<Vec<_>>();

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let view = panel::render(&self.state, usize::from(layout[1].width));

    Self::draw_header(frame, layout[0], &view);

    let list_items = match &view.body {
      PanelBody::LoadFailed(error) => vec![Self::plain_item(&format!(
        "Could not load comments: {error} (r to retry)"
      ))],
      PanelBody::Loading => vec![Self::plain_item(LOADING_COMMENTS_STATUS)],
      PanelBody::Placeholder => vec![Self::plain_item(NO_COMMENTS_TEXT)],
      PanelBody::Comments(rows) => rows
        .iter()
        .map(|row| Self::comment_list_item(row, layout[1].width))
        .collect(),
      PanelBody::Translated { lines, .. } => lines
        .iter()
        .map(|line| Self::plain_item(line.as_str()))
        .collect(),
    };

    let mut list_state = ListState::default()
      .with_selected(view.selected)
      .with_offset(view.offset);

    let list = List::new(list_items).highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    if view.selected.is_some() {
      self.state.set_list_offset(list_state.offset());
    }

    let status = Paragraph::new(view.status.clone())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    match self.state.mode() {
      Mode::Compose(form) => Self::draw_compose(frame, form),
      Mode::LanguagePicker(picker) => Self::draw_picker(frame, picker),
      Mode::LimitPicker(picker) => Self::draw_picker(frame, picker),
      Mode::Panel => {}
    }

    if let Some(prompt) = self.state.prompt() {
      Self::draw_prompt(frame, prompt);
    }

    self.state.help().draw(frame);
  }

  fn draw_compose(frame: &mut Frame, form: &ComposeForm) {
    let area = centered_rect(frame.area(), 70, 9);

    let field = |label: &str, value: &str, focused: bool| {
      let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::White)
      };

      let cursor = if focused { "▏" } else { "" };

      Line::from(vec![
        Span::styled(format!("{label}: "), style),
        Span::raw(value.to_string()),
        Span::styled(cursor, style),
      ])
    };

    let lines = vec![
      field("Name", &form.name, form.focus == ComposeField::Name),
      Line::from(""),
      field("Comment", &form.comment, form.focus == ComposeField::Comment),
    ];

    frame.render_widget(Clear, area);

    frame.render_widget(
      Paragraph::new(lines)
        .block(Block::default().title("New comment").borders(Borders::ALL))
        .wrap(Wrap { trim: false }),
      area,
    );
  }

  fn draw_header(frame: &mut Frame, area: Rect, view: &PanelView) {
    let language = if view.language.is_default() {
      String::new()
    } else {
      format!(" • translated to {}", view.language.label)
    };

    let header = Paragraph::new(vec![
      Line::from(Span::styled(
        format!("COMMENTS • showing up to {}{language}", view.limit),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(
        view.session.text(),
        Style::default().fg(Color::DarkGray),
      )),
    ]);

    frame.render_widget(header, area);
  }

  fn draw_picker<T: Copy + PartialEq>(frame: &mut Frame, picker: &Picker<T>) {
    let labels = picker.labels().map(str::to_owned).collect::<Vec<_>>();

    let width = labels
      .iter()
      .map(|label| label.chars().count())
      .chain(std::iter::once(picker.title.chars().count()))
      .max()
      .unwrap_or(0)
      .saturating_add(6);

    let area = centered_rect(frame.area(), width, labels.len().saturating_add(2));

    let items = labels
      .into_iter()
      .map(|label| ListItem::new(Line::from(format!(" {label}"))))
      .collect::<Vec<_>>();

    let mut list_state =
      ListState::default().with_selected(picker.selected_index());

    let list = List::new(items)
      .block(Block::default().title(picker.title).borders(Borders::ALL))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      );

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);
  }

  fn draw_prompt(frame: &mut Frame, prompt: &Prompt) {
    let mut lines = vec![Line::from(prompt.message.clone()), Line::from("")];

    if let Some(url) = &prompt.url {
      lines.push(Line::from(Span::styled(
        format!("o  open {}", truncate(url, 50)),
        Style::default().fg(Color::Cyan),
      )));
    }

    lines.push(Line::from(Span::styled(
      "esc  dismiss",
      Style::default().fg(Color::DarkGray),
    )));

    let area = centered_rect(frame.area(), 64, 9);

    frame.render_widget(Clear, area);

    frame.render_widget(
      Paragraph::new(lines)
        .block(
          Block::default()
            .title("Permission needed")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true }),
      area,
    );
  }

  fn execute_effect(&mut self, effect: Effect) {
    debug!(?effect, "executing effect");

    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::FetchComments { limit, request_id } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Comments {
            request_id,
            result: client.fetch_comments(limit).await,
          });
        });
      }
      Effect::FetchSession => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Session {
            result: client.fetch_session().await,
          });
        });
      }
      Effect::DeleteAll => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::AllDeleted {
            result: client.delete_all().await,
          });
        });
      }
      Effect::DeleteComment { comment_id } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::CommentDeleted {
            comment_id,
            result: client.delete_comment(comment_id).await,
          });
        });
      }
      Effect::SubmitComment {
        name,
        nickname,
        text,
      } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::CommentSubmitted {
            result: client.submit_comment(&name, &text, &nickname).await,
          });
        });
      }
      Effect::Translate {
        language,
        limit,
        request_id,
      } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Translation {
            request_id,
            result: client.translate_comments(limit, language.code).await,
          });
        });
      }
      Effect::OpenUrl { url } => {
        match client
          .resolve_url(&url)
          .and_then(|url| {
            webbrowser::open(&url)
              .map(|()| url)
              .map_err(anyhow::Error::from)
          })
        {
          Ok(url) => {
            info!(%url, "opened session page");

            self.state.set_transient_message(format!(
              "Opened in browser: {}",
              truncate(&url, 80)
            ));
          }
          Err(error) => {
            warn!(%error, "could not open session page");

            self
              .state
              .set_transient_message(format!("Could not open link: {error}"));
          }
        }
      }
    }
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn plain_item(text: &str) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::raw(text.to_string()),
    ]))
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      if let Some(error) = event.error() {
        warn!(error = %format!("{error:#}"), "request failed");
      }

      for effect in self.state.handle_event(event) {
        self.execute_effect(effect);
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    self.run_command(Command::Reload);

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else if self.state.prompt().is_some() {
        Prompt::handle_key(key)
      } else {
        self.state.mode().handle_key(key)
      };

      if self.run_command(command) {
        break;
      }
    }

    info!("exiting comments panel");

    Ok(())
  }

  fn run_command(&mut self, command: Command) -> bool {
    match self.state.dispatch_command(command) {
      Ok(dispatch) => {
        for effect in dispatch.effects {
          self.execute_effect(effect);
        }

        dispatch.should_exit
      }
      Err(error) => {
        warn!(error = %format!("{error:#}"), "command failed");
        self.state.set_transient_message(format!("error: {error:#}"));
        false
      }
    }
  }
}
