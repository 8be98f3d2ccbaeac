use super::*;

/// A rectangle of at most `width` by `height` cells, centered in `area`.
pub(crate) fn centered_rect(area: Rect, width: usize, height: usize) -> Rect {
  fn saturating_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
  }

  let available_width = area.width.saturating_sub(2).max(1);
  let available_height = area.height.saturating_sub(2).max(1);

  let width = available_width
    .clamp(1, saturating_usize_to_u16(width).max(1))
    .min(area.width);

  let height = available_height
    .clamp(1, saturating_usize_to_u16(height).max(1))
    .min(area.height);

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  Rect::new(x, y, width, height)
}

pub(crate) fn comments_markup(comments: &[Comment]) -> String {
  let mut markup = String::from("<ul>");

  for comment in comments {
    markup.push_str("<li><b>");
    markup.push_str(&html_escape::encode_text(comment.author()));
    markup.push_str("</b>: ");
    markup.push_str(&html_escape::encode_text(&comment.comment));
    markup.push_str("</li>");
  }

  markup.push_str("</ul>");

  markup
}

pub(crate) fn deserialize_optional_score<'de, D>(
  deserializer: D,
) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => Ok(n.as_f64()),
    Some(Value::String(s)) => Ok(s.trim().parse::<f64>().ok()),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"number or numeric string",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"number or numeric string",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"number or numeric string",
    )),
  }
}

pub(crate) fn format_score(score: f64) -> String {
  format!("{:+.2}", score.clamp(-1.0, 1.0))
}

/// Converts an HTML fragment into display lines no wider than `width`.
pub(crate) fn html_to_lines(html: &str, width: usize) -> Vec<String> {
  let text = html2text::from_read(html.as_bytes(), width.max(8))
    .unwrap_or_else(|_| strip_markup(html));

  text
    .lines()
    .map(str::trim_end)
    .filter(|line| !line.is_empty())
    .map(str::to_owned)
    .collect()
}

pub(crate) fn strip_markup(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;
  let mut last_was_space = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        inside_tag = true;

        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      '>' => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ if ch.is_whitespace() => {
        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      _ => {
        cleaned.push(ch);
        last_was_space = false;
      }
    }
  }

  let decoded = html_escape::decode_html_entities(cleaned.trim());

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();

  for paragraph in text.lines() {
    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
      let word_width = word.chars().count();

      if current.is_empty() {
        current.push_str(word);
        current_width = word_width;
      } else if current_width + 1 + word_width <= width {
        current.push(' ');
        current.push_str(word);
        current_width += 1 + word_width;
      } else {
        lines.push(current);
        current = word.to_string();
        current_width = word_width;
      }
    }

    if !current.is_empty() {
      lines.push(current);
    }
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
