use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionInfo {
  #[serde(default)]
  pub(crate) is_admin: bool,
  pub(crate) is_logged_in: bool,
  #[serde(default)]
  pub(crate) nickname: String,
  #[serde(alias = "loginOrLogoutUrl")]
  pub(crate) url: String,
  #[serde(default)]
  pub(crate) user_id: Option<String>,
}

impl SessionInfo {
  /// The signed-in user's id, treating the backend's empty string as absent.
  pub(crate) fn user_id(&self) -> Option<&str> {
    self
      .user_id
      .as_deref()
      .filter(|id| self.is_logged_in && !id.is_empty())
  }
}
