use {
  anyhow::{Context, bail},
  app::App,
  clap::Parser,
  client::{Client, Deletion},
  command::Command,
  command_dispatch::CommandDispatch,
  comment::Comment,
  compose_form::{ComposeField, ComposeForm},
  config::{Cli, Config},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  event::Event,
  help_view::HelpView,
  language::Language,
  list_view::ListView,
  mode::Mode,
  panel::{CommentRow, PanelBody, PanelView},
  pending_load::PendingLoad,
  picker::Picker,
  prompt::Prompt,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
  },
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected},
  },
  serde_json::Value,
  session::SessionInfo,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    env,
    fs::{self, File},
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  store::{LocalStore, Viewer},
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  tracing_subscriber::{EnvFilter, filter::LevelFilter},
  transient_message::TransientMessage,
  utils::{
    centered_rect, comments_markup, deserialize_optional_score, format_score,
    html_to_lines, truncate, wrap_text,
  },
};

mod app;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod compose_form;
mod config;
mod effect;
mod event;
mod help_view;
mod language;
mod list_view;
mod mode;
mod panel;
mod pending_load;
mod picker;
mod prompt;
mod session;
mod state;
mod store;
mod transient_message;
mod utils;

const PANEL_STATUS: &str = "↑/k up • ↓/j down • d delete • D delete all • n new • L limit • t translate • o sign in/out • ? help • q quit";

const COMPOSE_STATUS: &str =
  "tab switch field • enter post • esc cancel";

const PICKER_STATUS: &str = "↑/k up • ↓/j down • enter choose • esc cancel";

const PROMPT_STATUS: &str = "o open sign-in page • esc dismiss";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_COMMENTS_STATUS: &str = "Loading comments...";
const LOADING_SESSION_STATUS: &str = "Checking sign-in status...";
const DELETING_STATUS: &str = "Deleting...";
const POSTING_STATUS: &str = "Posting comment...";

const NO_COMMENTS_TEXT: &str = "No comments yet.";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Comments:
  ↑ / k   move selection up
  ↓ / j   move selection down
  home    jump to the first comment
  end     jump to the last comment
  r       reload comments and sign-in status

Actions:
  d       delete the selected comment (yours, or any as admin)
  D       delete all comments (admins only)
  n       write a new comment (signed in only)
  L       choose how many comments to show
  t       translate the displayed comments
  o       open the sign-in or sign-out page in your browser
  q       quit
  esc     close help or quit from the panel
  ?       toggle this help

Compose:
  tab     switch between name and comment
  enter   post the comment
  esc     discard the draft
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging(path: &Path) -> Result {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let file = File::options()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  let env_filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .with_env_var("COMMENTS_LOG")
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();

  Ok(())
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let config = Config::try_from(Cli::parse())?;

  initialize_logging(&config.log_file)?;

  info!(base_url = %config.base_url, "starting comments panel");

  let client = Client::new(&config).context("could not build http client")?;

  let store = LocalStore::load(config.store_file.clone())
    .context("could not load local store")?;

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, State::new(store, config.default_limit));

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
