use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
  pub(crate) comment: String,
  pub(crate) id: i64,
  #[serde(default)]
  pub(crate) name: Option<String>,
  #[serde(default, deserialize_with = "deserialize_optional_score")]
  pub(crate) sentiment: Option<f64>,
  #[serde(default)]
  pub(crate) user_id: Option<String>,
}

impl Comment {
  pub(crate) fn author(&self) -> &str {
    self
      .name
      .as_deref()
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .unwrap_or("anonymous")
  }

  pub(crate) fn header(&self) -> String {
    match self.sentiment {
      Some(score) => format!("{} • {}", self.author(), format_score(score)),
      None => self.author().to_string(),
    }
  }

  pub(crate) fn is_owned_by(&self, user_id: &str) -> bool {
    !user_id.is_empty() && self.user_id.as_deref() == Some(user_id)
  }
}

#[cfg(test)]
pub(crate) fn sample_comment(id: i64, user_id: &str) -> Comment {
  Comment {
    comment: format!("comment {id}"),
    id,
    name: Some(format!("author {id}")),
    sentiment: Some(0.25),
    user_id: Some(user_id.to_string()),
  }
}
