use {
  super::*,
  reqwest::{Response, StatusCode, Url, header::LOCATION, redirect::Policy},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deletion {
  Deleted,
  Denied,
}

#[derive(Clone)]
pub(crate) struct Client {
  base_url: Url,
  client: reqwest::Client,
  delete_all_path: String,
}

impl Client {
  const COMMENTS_PATH: &str = "/data";

  const DELETE_COMMENT_PATH: &str = "/delete-mine";

  const LOGIN_STATUS_PATH: &str = "/login-status";

  const PAGE_PATH: &str = "/index.html";

  const TRANSLATE_PATH: &str = "/translate";

  pub(crate) async fn delete_all(&self) -> Result<Deletion> {
    debug!(path = %self.delete_all_path, "deleting all comments");

    let response = self
      .client
      .post(self.endpoint(&self.delete_all_path)?)
      .send()
      .await?;

    Self::deletion_outcome(response).await
  }

  pub(crate) async fn delete_comment(&self, comment_id: i64) -> Result<Deletion> {
    debug!(comment_id, "deleting comment");

    let response = self
      .client
      .post(self.endpoint(Self::DELETE_COMMENT_PATH)?)
      .form(&[("commentId", comment_id.to_string())])
      .send()
      .await?;

    Self::deletion_outcome(response).await
  }

  async fn deletion_outcome(response: Response) -> Result<Deletion> {
    if matches!(
      response.status(),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    ) {
      return Ok(Deletion::Denied);
    }

    let body = response.error_for_status()?.text().await?;

    Ok(Self::parse_deletion_body(&body))
  }

  fn endpoint(&self, path: &str) -> Result<Url> {
    self
      .base_url
      .join(path)
      .with_context(|| format!("invalid endpoint path `{path}`"))
  }

  pub(crate) async fn fetch_comments(&self, limit: usize) -> Result<Vec<Comment>> {
    debug!(limit, "fetching comments");

    let mut comments = self
      .client
      .get(self.endpoint(Self::COMMENTS_PATH)?)
      .query(&[("limit", limit)])
      .send()
      .await?
      .error_for_status()?
      .json::<Vec<Comment>>()
      .await
      .context("malformed comment list")?;

    comments.truncate(limit);

    Ok(comments)
  }

  pub(crate) async fn fetch_session(&self) -> Result<SessionInfo> {
    debug!("fetching login status");

    Ok(
      self
        .client
        .get(self.endpoint(Self::LOGIN_STATUS_PATH)?)
        .send()
        .await?
        .error_for_status()?
        .json::<SessionInfo>()
        .await
        .context("malformed login status")?,
    )
  }

  pub(crate) fn new(config: &Config) -> Result<Self> {
    let client = reqwest::Client::builder()
      .redirect(Policy::none())
      .build()?;

    Ok(Self {
      base_url: config.base_url.clone(),
      client,
      delete_all_path: config.delete_all_path.clone(),
    })
  }

  fn parse_deletion_body(body: &str) -> Deletion {
    match body
      .split_whitespace()
      .next()
      .map(serde_json::from_str::<bool>)
    {
      Some(Ok(true)) => Deletion::Deleted,
      _ => Deletion::Denied,
    }
  }

  fn redirects_to_page(&self, location: &str) -> bool {
    self.base_url.join(location).is_ok_and(|target| {
      target.origin() == self.base_url.origin()
        && target.path().starts_with(Self::PAGE_PATH)
    })
  }

  pub(crate) fn resolve_url(&self, url: &str) -> Result<String> {
    Ok(
      self
        .base_url
        .join(url)
        .with_context(|| format!("invalid session url `{url}`"))?
        .to_string(),
    )
  }

  pub(crate) async fn submit_comment(
    &self,
    name: &str,
    text: &str,
    nickname: &str,
  ) -> Result {
    debug!(name, "posting comment");

    let response = self
      .client
      .post(self.endpoint(Self::COMMENTS_PATH)?)
      .form(&[("name", name), ("comment", text), ("nickname", nickname)])
      .send()
      .await?
      .error_for_status()?;

    if response.status().is_redirection() {
      let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

      if !self.redirects_to_page(location) {
        bail!("sign in to post comments");
      }
    }

    Ok(())
  }

  pub(crate) async fn translate(
    &self,
    language_code: &str,
    text: &str,
  ) -> Result<String> {
    debug!(language_code, "translating comments");

    Ok(
      self
        .client
        .get(self.endpoint(Self::TRANSLATE_PATH)?)
        .query(&[("languageCode", language_code), ("text", text)])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?,
    )
  }

  /// Reloads the comments and translates their rendered markup.
  pub(crate) async fn translate_comments(
    &self,
    limit: usize,
    language_code: &str,
  ) -> Result<(Vec<Comment>, String)> {
    let comments = self.fetch_comments(limit).await?;

    let translated = self
      .translate(language_code, &comments_markup(&comments))
      .await
      .with_context(|| format!("could not translate to `{language_code}`"))?;

    Ok((comments, translated))
  }
}
