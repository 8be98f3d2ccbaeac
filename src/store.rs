use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredValues {
  #[serde(default)]
  is_admin: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  limit: Option<usize>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  user_id: Option<String>,
}

/// Values the panel remembers between runs: the chosen display limit and the
/// identity flags from the last session check.
#[derive(Debug)]
pub(crate) struct LocalStore {
  path: PathBuf,
  values: StoredValues,
}

/// Who is looking at the panel, as far as rendering decisions go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Viewer {
  pub(crate) is_admin: bool,
  pub(crate) user_id: Option<String>,
}

impl LocalStore {
  fn ensure_parent_dir(path: &Path) -> Result {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    Ok(())
  }

  pub(crate) fn limit(&self) -> Option<usize> {
    self.values.limit
  }

  pub(crate) fn load(path: PathBuf) -> Result<Self> {
    let values = if path.exists() {
      let data = fs::read(&path)
        .with_context(|| format!("could not read {}", path.display()))?;

      if data.is_empty() {
        StoredValues::default()
      } else {
        serde_json::from_slice::<StoredValues>(&data)
          .with_context(|| format!("could not parse {}", path.display()))?
      }
    } else {
      StoredValues::default()
    };

    Ok(Self { path, values })
  }

  /// Writes `values` to disk and only then adopts them, so a failed write
  /// leaves the in-memory values as they were.
  fn persist(&mut self, values: StoredValues) -> Result {
    Self::ensure_parent_dir(&self.path)?;

    let serialized = serde_json::to_vec_pretty(&values)?;

    fs::write(&self.path, serialized)
      .with_context(|| format!("could not write {}", self.path.display()))?;

    self.values = values;

    Ok(())
  }

  pub(crate) fn remember_session(&mut self, session: &SessionInfo) -> Result {
    let values = StoredValues {
      is_admin: session.is_logged_in && session.is_admin,
      limit: self.values.limit,
      user_id: session.user_id().map(str::to_owned),
    };

    if values == self.values {
      return Ok(());
    }

    self.persist(values)
  }

  pub(crate) fn set_limit(&mut self, limit: usize) -> Result {
    self.persist(StoredValues {
      limit: Some(limit),
      ..self.values.clone()
    })
  }

  pub(crate) fn viewer(&self) -> Viewer {
    Viewer {
      is_admin: self.values.is_admin,
      user_id: self.values.user_id.clone(),
    }
  }
}

impl Viewer {
  pub(crate) fn can_delete(&self, comment: &Comment) -> bool {
    self.is_admin
      || self
        .user_id
        .as_deref()
        .is_some_and(|user_id| comment.is_owned_by(user_id))
  }
}

#[cfg(test)]
pub(crate) fn temp_store_path(label: &str) -> PathBuf {
  use std::sync::atomic::{AtomicUsize, Ordering};

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

  env::temp_dir().join(format!(
    "comments_{label}_{}_{unique}.json",
    process::id()
  ))
}
