use {super::*, reqwest::Url};

#[derive(Debug, Parser)]
#[command(name = "comments", about = "Read, post and moderate portfolio comments")]
pub(crate) struct Cli {
  #[arg(long, env = "COMMENTS_BASE_URL", default_value = "http://localhost:8080")]
  base_url: String,

  #[arg(long, env = "COMMENTS_DELETE_ALL_PATH", default_value = "/delete-all")]
  delete_all_path: String,

  #[arg(long = "limit", env = "COMMENTS_DEFAULT_LIMIT", default_value_t = 5)]
  default_limit: usize,

  #[arg(long, env = "COMMENTS_LOG_FILE")]
  log_file: Option<PathBuf>,

  #[arg(long, env = "COMMENTS_STORE_FILE")]
  store_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub(crate) struct Config {
  pub(crate) base_url: Url,
  pub(crate) default_limit: usize,
  pub(crate) delete_all_path: String,
  pub(crate) log_file: PathBuf,
  pub(crate) store_file: PathBuf,
}

impl Config {
  fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
      return Ok(PathBuf::from(dir));
    }

    if let Ok(home) = env::var("HOME") {
      return Ok(PathBuf::from(home).join(".config"));
    }

    Ok(env::current_dir()?.join(".config"))
  }

  fn default_store_file() -> Result<PathBuf> {
    Ok(Self::config_dir()?.join("comments").join("store.json"))
  }
}

impl TryFrom<Cli> for Config {
  type Error = anyhow::Error;

  fn try_from(cli: Cli) -> Result<Self> {
    let base_url = Url::parse(&cli.base_url)
      .with_context(|| format!("invalid base url `{}`", cli.base_url))?;

    if base_url.cannot_be_a_base() {
      bail!("base url `{base_url}` cannot be used to resolve endpoints");
    }

    let delete_all_path = if cli.delete_all_path.starts_with('/') {
      cli.delete_all_path
    } else {
      format!("/{}", cli.delete_all_path)
    };

    let store_file = match cli.store_file {
      Some(path) => path,
      None => Self::default_store_file()?,
    };

    let log_file = cli
      .log_file
      .unwrap_or_else(|| env::temp_dir().join("comments.log"));

    Ok(Self {
      base_url,
      default_limit: cli.default_limit,
      delete_all_path,
      log_file,
      store_file,
    })
  }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
  Config {
    base_url: Url::parse("http://localhost:8080").expect("valid url"),
    default_limit: 5,
    delete_all_path: "/delete-all".to_string(),
    log_file: env::temp_dir().join("comments_test.log"),
    store_file: env::temp_dir().join("comments_test_store.json"),
  }
}
