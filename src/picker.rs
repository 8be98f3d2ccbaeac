use super::*;

/// A small modal list of choices, used for the display limit and the
/// translation language.
pub(crate) struct Picker<T> {
  pub(crate) title: &'static str,
  view: ListView<(String, T)>,
}

impl<T: Copy + PartialEq> Picker<T> {
  pub(crate) fn labels(&self) -> impl Iterator<Item = &str> {
    self.view.items().iter().map(|(label, _)| label.as_str())
  }

  pub(crate) fn new(
    title: &'static str,
    options: Vec<(String, T)>,
    current: T,
  ) -> Self {
    let selected = options
      .iter()
      .position(|(_, value)| *value == current)
      .unwrap_or(0);

    let mut view = ListView::new(options);
    view.set_selected(selected);

    Self { title, view }
  }

  pub(crate) fn select_next(&mut self) {
    self.view.select_next();
  }

  pub(crate) fn select_previous(&mut self) {
    self.view.select_previous();
  }

  pub(crate) fn selected(&self) -> Option<T> {
    self.view.selected_item().map(|(_, value)| *value)
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.view.selected_index()
  }
}

impl Picker<Language> {
  pub(crate) fn languages(current: Language) -> Self {
    let options = Language::all()
      .iter()
      .map(|language| {
        (format!("{} ({})", language.label, language.code), *language)
      })
      .collect();

    Self::new("Translate to", options, current)
  }
}

impl Picker<usize> {
  const LIMIT_OPTIONS: [usize; 6] = [1, 5, 10, 20, 50, 100];

  pub(crate) fn limits(current: usize) -> Self {
    let mut limits = Self::LIMIT_OPTIONS.to_vec();

    if !limits.contains(&current) {
      limits.push(current);
      limits.sort_unstable();
    }

    let options = limits
      .into_iter()
      .map(|limit| {
        let label = match limit {
          1 => "1 comment".to_string(),
          _ => format!("{limit} comments"),
        };

        (label, limit)
      })
      .collect();

    Self::new("Show at most", options, current)
  }
}
